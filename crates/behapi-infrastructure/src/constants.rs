//! Infrastructure layer constants
//!
//! Service identifiers and tag names are domain constants, see
//! `behapi_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "behapi.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "behapi";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "BEHAPI";

/// Separator for nested keys in environment variables (`BEHAPI_APP__ID`)
pub const ENV_NESTING_SEPARATOR: &str = "__";

/// Table holding the block when it is not at the root of the file
pub const CONFIG_TABLE: &str = "behapi";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "BEHAPI_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// SERVICE DEFAULTS
// ============================================================================

/// Formatter used by the debug reporter when none is configured
pub const DEFAULT_DEBUG_FORMATTER: &str = "pretty";

/// Key-value store reached when `kv.url` is not configured
pub const DEFAULT_KV_URL: &str = "redis://127.0.0.1:6379";

/// Number of HTTP exchanges kept by the history
pub const DEFAULT_HISTORY_LIMIT: usize = 1;

/// HTTP request timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
