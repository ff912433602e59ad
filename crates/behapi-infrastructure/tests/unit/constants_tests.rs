//! Constants Tests

use behapi_infrastructure::constants::*;

#[test]
fn test_config_constants() {
    assert_eq!(DEFAULT_CONFIG_FILENAME, "behapi.toml");
    assert_eq!(CONFIG_ENV_PREFIX, "BEHAPI");
    assert_eq!(ENV_NESTING_SEPARATOR, "__");
    assert_eq!(LOG_FILTER_ENV, format!("{CONFIG_ENV_PREFIX}_LOG"));
}

#[test]
fn test_service_defaults() {
    assert_eq!(DEFAULT_DEBUG_FORMATTER, "pretty");
    assert!(DEFAULT_KV_URL.starts_with("redis://"));
    assert_eq!(DEFAULT_HISTORY_LIMIT, 1);
    assert!(DEFAULT_HTTP_TIMEOUT_SECS > 0);
}
