//! Configuration schema
//!
//! Validation is a single pass collecting every violation, so that a user
//! fixing their file sees all problems at once.

use behapi_domain::error::{Error, FieldViolation, Result};
use behapi_domain::value_objects::{AppCredentials, Environment};
use tracing::{debug, warn};

use super::types::{CompositionConfig, RawBehapiConfig};
use crate::constants::DEFAULT_DEBUG_FORMATTER;
use crate::logging::parse_log_level;

/// Validator of the raw configuration block
///
/// | Key | Rule | Default |
/// |-----|------|---------|
/// | `base_url` | required, non-empty | |
/// | `environment` | `dev` or `test` | `dev` |
/// | `debug_formatter` | free text | `pretty` |
/// | `app.id`, `app.secret` | required, non-empty | |
/// | `http.history_limit` | at least 1 | 1 |
/// | `kv.url` | non-empty | `redis://127.0.0.1:6379` |
/// | `logging.level` | a tracing level | `info` |
pub struct ConfigurationSchema;

impl ConfigurationSchema {
    /// Validate `raw`, applying defaults
    pub fn validate(raw: RawBehapiConfig) -> Result<CompositionConfig> {
        let mut violations = Vec::new();

        let base_url = required(&mut violations, "base_url", raw.base_url);

        let environment = match raw.environment.as_deref() {
            None => Environment::default(),
            Some(value) => value.parse().unwrap_or_else(|reason: String| {
                violations.push(FieldViolation::new("environment", reason));
                Environment::default()
            }),
        };

        let app = raw.app.unwrap_or_default();
        let app_id = required(&mut violations, "app.id", app.id);
        let app_secret = required(&mut violations, "app.secret", app.secret);

        if raw.http.history_limit == 0 {
            violations.push(FieldViolation::new(
                "http.history_limit",
                "must be at least 1",
            ));
        }

        if raw.kv.url.trim().is_empty() {
            violations.push(FieldViolation::new("kv.url", "cannot be empty"));
        }

        if parse_log_level(&raw.logging.level).is_err() {
            violations.push(FieldViolation::new(
                "logging.level",
                "must be one of trace, debug, info, warn, error",
            ));
        }

        if !violations.is_empty() {
            warn!(count = violations.len(), "Configuration rejected");
            return Err(Error::configuration(violations));
        }

        debug!(%environment, "Configuration validated");
        Ok(CompositionConfig {
            base_url,
            environment,
            debug_formatter: raw
                .debug_formatter
                .unwrap_or_else(|| DEFAULT_DEBUG_FORMATTER.to_string()),
            app: AppCredentials::new(app_id, app_secret),
            http: raw.http,
            kv: raw.kv,
            logging: raw.logging,
        })
    }
}

fn required(violations: &mut Vec<FieldViolation>, field: &str, value: Option<String>) -> String {
    match value {
        None => {
            violations.push(FieldViolation::new(field, "is required"));
            String::new()
        }
        Some(value) if value.trim().is_empty() => {
            violations.push(FieldViolation::new(field, "cannot be empty"));
            String::new()
        }
        Some(value) => value,
    }
}
