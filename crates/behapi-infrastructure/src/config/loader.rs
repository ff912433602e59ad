//! Configuration loader
//!
//! Handles loading configuration from a TOML file and environment
//! variables. The block may sit at the root of the file or under a
//! `[behapi]` table.

use std::env;
use std::path::{Path, PathBuf};

use behapi_domain::error::Result;
use figment::Figment;
use figment::providers::{Env, Format, Toml};

use super::schema::ConfigurationSchema;
use super::types::{CompositionConfig, RawBehapiConfig};
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load and validate configuration
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Defaults of each section
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `BEHAPI_APP__SECRET`)
    pub fn load(&self) -> Result<CompositionConfig> {
        ConfigurationSchema::validate(self.load_raw()?)
    }

    /// Load the raw block without validating it
    pub fn load_raw(&self) -> Result<RawBehapiConfig> {
        self.figment()
            .extract()
            .config_context("Failed to extract configuration")
    }

    fn figment(&self) -> Figment {
        let mut file = Figment::new();

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                file = file.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            file = file.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        let figment = if file.contains(CONFIG_TABLE) {
            file.focus(CONFIG_TABLE)
        } else {
            file
        };

        // Double underscore separates nested keys, single ones stay in names
        figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(ENV_NESTING_SEPARATOR),
        )
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &RawBehapiConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find default configuration file paths to try
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
            dirs::config_dir()
                .map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|d| {
                    d.join(format!(".{}", DEFAULT_CONFIG_DIR))
                        .join(DEFAULT_CONFIG_FILENAME)
                })
                .unwrap_or_default(),
        ];

        candidates.into_iter().find(|path| path.exists())
    }
}
