//! Unit tests for configuration loading and saving.

use hrmimport::storage::config::{
    load_config_from, save_config_to, AppConfig, ConfigError, ReportFormat,
};
use std::path::PathBuf;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_config_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.import.output = PathBuf::from("/tmp/list.xml");
    config.import.sport_type_id = 4;
    config.import.strict = true;
    config.report.format = ReportFormat::Json;

    save_config_to(&config, &path).unwrap();
    assert_eq!(load_config_from(&path).unwrap(), config);
}

#[test]
fn test_unparsable_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[import\nsport_type_id = ").unwrap();

    assert!(matches!(load_config_from(&path), Err(ConfigError::ParseError(_))));
}
