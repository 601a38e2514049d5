//! Unit tests for layered configuration loading

use bootwire_domain::Error;
use bootwire_infrastructure::ConfigLoader;
use bootwire_infrastructure::constants::DEFAULT_LOG_LEVEL;
use figment::Jail;
use tempfile::TempDir;

#[test]
fn test_defaults_without_sources() {
    Jail::expect_with(|_| {
        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
        assert!(!config.logging.json_format);
        assert_eq!(config.properties.get("logging.level"), Some(DEFAULT_LOG_LEVEL));
        assert!(!config.properties.contains_key("scanning"));
        Ok(())
    });
}

#[test]
fn test_explicit_file_is_loaded() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "scanning = \"index\"\n\n[logging]\nlevel = \"debug\"\n").expect("write");

    Jail::expect_with(|_| {
        let loader = ConfigLoader::new().with_config_path(&path);
        assert_eq!(loader.config_path(), Some(path.as_path()));

        let config = loader.load().map_err(|e| e.to_string())?;
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.properties.get("scanning"), Some("index"));
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    Jail::expect_with(|jail| {
        let path = jail.directory().join("absent.toml");
        let config = ConfigLoader::new()
            .with_config_path(&path)
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
        Ok(())
    });
}

#[test]
fn test_default_file_in_working_directory() {
    Jail::expect_with(|jail| {
        jail.create_file("bootwire.toml", "scanning = \"cache\"\n[app]\nname = \"demo\"\n")?;

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;
        assert_eq!(config.properties.get("scanning"), Some("cache"));
        assert_eq!(config.properties.get("app.name"), Some("demo"));
        Ok(())
    });
}

#[test]
fn test_env_overrides_file_and_explicit_overrides_env() {
    Jail::expect_with(|jail| {
        jail.create_file("bootwire.toml", "scanning = \"cache\"\n[logging]\nlevel = \"warn\"\n")?;
        jail.set_env("BOOTWIRE__SCANNING", "off");
        jail.set_env("BOOTWIRE__LOGGING__LEVEL", "debug");

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;
        assert_eq!(config.properties.get("scanning"), Some("off"));
        assert_eq!(config.logging.level, "debug");

        let config = ConfigLoader::new()
            .with_property("scanning", "global_index")
            .with_properties([("app.mode", "batch")])
            .load()
            .map_err(|e| e.to_string())?;
        assert_eq!(config.properties.get("scanning"), Some("global_index"));
        assert_eq!(config.properties.get("app.mode"), Some("batch"));
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("MYAPP__SCANNING", "index");
        jail.set_env("BOOTWIRE__SCANNING", "off");

        let config = ConfigLoader::new()
            .with_env_prefix("MYAPP")
            .load()
            .map_err(|e| e.to_string())?;
        assert_eq!(config.properties.get("scanning"), Some("index"));
        Ok(())
    });
}

#[test]
fn test_invalid_log_level_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("BOOTWIRE__LOGGING__LEVEL", "loud");

        let err = ConfigLoader::new().load().expect_err("invalid level");
        assert!(matches!(err, Error::Configuration { .. }));
        Ok(())
    });
}

#[test]
fn test_malformed_file_is_a_configuration_error() {
    Jail::expect_with(|jail| {
        jail.create_file("bootwire.toml", "scanning = [unterminated")?;

        let err = ConfigLoader::new().load().expect_err("malformed");
        assert!(matches!(err, Error::Configuration { source: Some(_), .. }));
        assert!(err.to_string().contains("bootwire.toml"));
        Ok(())
    });
}
