//! Configuration loader tests
//!
//! Environment and working directory changes go through `figment::Jail`,
//! which serializes the tests touching them.

use behapi_domain::value_objects::Environment;
use behapi_infrastructure::config::{ConfigLoader, RawBehapiConfig};
use figment::Jail;
use tempfile::TempDir;

const ROOT_LEVEL: &str = r#"
base_url = "http://api.test"
environment = "test"

[app]
id = "X"
secret = "Y"
"#;

#[test]
fn test_load_root_level_block() {
    Jail::expect_with(|jail| {
        jail.create_file("behapi.toml", ROOT_LEVEL)?;

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert_eq!(config.base_url, "http://api.test");
        assert_eq!(config.environment, Environment::Test);
        assert_eq!(config.app.id, "X");
        Ok(())
    });
}

#[test]
fn test_load_block_under_table() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "suite.toml",
            r#"
            [behapi]
            base_url = "http://api.test"

            [behapi.app]
            id = "X"
            secret = "Y"

            [behapi.http]
            history_limit = 5
            "#,
        )?;

        let config = ConfigLoader::new()
            .with_config_path("suite.toml")
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(config.base_url, "http://api.test");
        assert_eq!(config.environment, Environment::Dev);
        assert_eq!(config.http.history_limit, 5);
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("behapi.toml", ROOT_LEVEL)?;
        jail.set_env("BEHAPI_BASE_URL", "http://staging.test");
        jail.set_env("BEHAPI_APP__SECRET", "from-env");
        jail.set_env("BEHAPI_HTTP__HISTORY_LIMIT", "3");

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert_eq!(config.base_url, "http://staging.test");
        assert_eq!(config.app.secret, "from-env");
        assert_eq!(config.http.history_limit, 3);
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("SUITE_BASE_URL", "http://api.test");
        jail.set_env("SUITE_APP__ID", "X");
        jail.set_env("SUITE_APP__SECRET", "Y");

        let config = ConfigLoader::new()
            .with_env_prefix("SUITE")
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(config.base_url, "http://api.test");
        Ok(())
    });
}

#[test]
fn test_missing_fields_are_reported_together() {
    Jail::expect_with(|jail| {
        jail.create_file("behapi.toml", "environment = \"test\"")?;

        let err = ConfigLoader::new().load().unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.clone()).collect();

        assert_eq!(fields, vec!["base_url", "app.id", "app.secret"]);
        Ok(())
    });
}

#[test]
fn test_malformed_file_is_a_config_error() {
    Jail::expect_with(|jail| {
        jail.create_file("behapi.toml", "base_url = [")?;

        let err = ConfigLoader::new().load_raw().unwrap_err();
        assert!(matches!(err, behapi_domain::Error::Config { .. }));
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_falls_back_to_env() {
    Jail::expect_with(|jail| {
        jail.set_env("BEHAPI_BASE_URL", "http://api.test");

        let raw = ConfigLoader::new()
            .with_config_path("does-not-exist.toml")
            .load_raw()
            .map_err(|e| e.to_string())?;

        assert_eq!(raw.base_url.as_deref(), Some("http://api.test"));
        assert!(raw.app.is_none());
        Ok(())
    });
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");
    let loader = ConfigLoader::new().with_config_path(&path);

    let raw = RawBehapiConfig::default()
        .with_base_url("http://api.test")
        .with_environment("dev")
        .with_app("X", "Y");
    loader.save_to_file(&raw, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("base_url = \"http://api.test\""));
    assert!(written.contains("[app]"));
    assert_eq!(loader.config_path(), Some(path.as_path()));
}
