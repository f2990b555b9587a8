/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use std::path::PathBuf;
use tweeseg::app_config::{Config, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.segmentation.max_segment_len, 1000);
    assert_eq!(config.segmentation.skip_tags, vec!["script".to_string(), "stylesheet".to_string()]);
    assert!(config.segmentation.skip_blank_passages);
    assert_eq!(config.input.extensions, vec!["twee".to_string(), "tw".to_string()]);
    assert_eq!(config.output.extension, "json");
    assert!(config.output.pretty);
    assert!(!config.cache.enabled);
    assert_eq!(config.concurrent_files, 4);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.segmentation.max_segment_len = 0;
    assert!(config.validate().is_err());
    config.segmentation.max_segment_len = 20;
    assert!(config.validate().is_ok());

    config.input.extensions = vec![".".to_string()];
    assert!(config.validate().is_err());
    config.input.extensions = vec![".twee".to_string()];
    assert!(config.validate().is_ok());

    config.concurrent_files = 0;
    assert!(config.validate().is_err());
    config.concurrent_files = 1;

    config.output.extension = String::new();
    assert!(config.validate().is_err());
}

/// Test that partial JSON is completed with defaults
#[test]
fn test_config_deserialization_withPartialJson_shouldFillDefaults() -> Result<()> {
    let json = r#"{ "segmentation": { "max_segment_len": 250 }, "log_level": "debug" }"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.segmentation.max_segment_len, 250);
    assert_eq!(config.segmentation.skip_tags.len(), 2);
    assert_eq!(config.input.extensions.len(), 2);
    assert_eq!(config.concurrent_files, 4);
    assert_eq!(config.log_level, LogLevel::Debug);

    Ok(())
}

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;
    assert_eq!(config, Config::default());
    assert!(path.exists());

    // A second load reads the file back
    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded, config);

    Ok(())
}

/// Test that a malformed config file is reported
#[test]
fn test_from_file_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    let err = Config::from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));

    Ok(())
}

/// Test cache path resolution
#[test]
fn test_cache_resolved_path_withExplicitPath_shouldUseIt() {
    let mut config = Config::default();
    assert!(config.cache.resolved_path().is_none());

    config.cache.enabled = true;
    config.cache.path = Some(PathBuf::from("cache/segments.json"));
    assert_eq!(config.cache.resolved_path(), Some(PathBuf::from("cache/segments.json")));
}

/// Test log level conversion
#[test]
fn test_log_level_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
