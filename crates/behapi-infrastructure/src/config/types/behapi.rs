//! Composition configuration types
//!
//! [`RawBehapiConfig`] is what the user wrote, every top-level key
//! optional. [`CompositionConfig`] only exists once validation passed.

use std::time::Duration;

use behapi_domain::value_objects::{AppCredentials, Environment};
use behapi_providers::http::HttpClientOptions;
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::services::{HttpConfig, KvConfig};

/// `app` block as written by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAppConfig {
    /// Application identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Application secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// The configuration block before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBehapiConfig {
    /// Base URL of the tested API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// `dev` or `test`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Formatter name of the debug reporter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_formatter: Option<String>,

    /// Application credentials
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<RawAppConfig>,

    /// HTTP client settings
    pub http: HttpConfig,

    /// Key-value store settings
    pub kv: KvConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl RawBehapiConfig {
    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the environment
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Set the application credentials
    pub fn with_app(mut self, id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.app = Some(RawAppConfig {
            id: Some(id.into()),
            secret: Some(secret.into()),
        });
        self
    }

    /// Set the debug formatter
    pub fn with_debug_formatter(mut self, formatter: impl Into<String>) -> Self {
        self.debug_formatter = Some(formatter.into());
        self
    }
}

/// Validated configuration, the only input of the composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionConfig {
    /// Base URL of the tested API
    pub base_url: String,
    /// Selected environment
    pub environment: Environment,
    /// Formatter name of the debug reporter
    pub debug_formatter: String,
    /// Application credentials
    pub app: AppCredentials,
    /// HTTP client settings
    pub http: HttpConfig,
    /// Key-value store settings
    pub kv: KvConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl CompositionConfig {
    /// Options of the HTTP client built by the factory
    pub fn http_client_options(&self) -> HttpClientOptions {
        let mut options = HttpClientOptions::new(&self.base_url);
        options.timeout = Duration::from_secs(self.http.timeout_secs);
        if let Some(user_agent) = &self.http.user_agent {
            options.user_agent = user_agent.clone();
        }
        options
    }
}
