//! Logging Tests

use bootwire_domain::Error;
use bootwire_infrastructure::constants::DEFAULT_LOG_LEVEL;
use bootwire_infrastructure::logging::{LoggingConfig, init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").expect("trace"), Level::TRACE);
    assert_eq!(parse_log_level("debug").expect("debug"), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").expect("info"), Level::INFO);
    assert_eq!(parse_log_level("warn").expect("warn"), Level::WARN);
    assert_eq!(parse_log_level("warning").expect("warning"), Level::WARN);
    assert_eq!(parse_log_level("error").expect("error"), Level::ERROR);

    assert!(parse_log_level("invalid").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
}

#[test]
fn test_init_logging_rejects_invalid_level() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        ..LoggingConfig::default()
    };
    assert!(matches!(init_logging(&config), Err(Error::Configuration { .. })));
}

#[test]
fn test_second_initialisation_is_an_error() {
    let config = LoggingConfig::default();
    let _ = init_logging(&config);

    assert!(matches!(init_logging(&config), Err(Error::Configuration { .. })));
}
