//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use geoproc_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

fn clear_env() {
    env::remove_var("GEOPROC_OFFSET_DISTANCE");
    env::remove_var("GEOPROC_EXTRUDE_HEIGHT");
    env::remove_var("GEOPROC_PRESERVE_PROPERTIES");
}

#[test]
fn test_default_configuration() {
    let config = LayeredConfig::with_defaults();

    assert_eq!(config.offset_distance.value, 1.0);
    assert_eq!(config.extrude_height.value, 10.0);
    assert!(config.preserve_properties.value);
    assert_eq!(config.extrude_height.source, ConfigSource::Default);
}

#[test]
fn test_partial_file_configuration() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
extrude_height = 25.0
# Only override the height, leave others as defaults
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.extrude_height.value, 25.0);
    assert_eq!(config.extrude_height.source, ConfigSource::File);
    assert_eq!(config.offset_distance.source, ConfigSource::Default);
    assert_eq!(config.preserve_properties.source, ConfigSource::Default);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/geoproc.toml");
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "offset_distance = 3.0\nextrude_height = 7.0").unwrap();

    env::set_var("GEOPROC_OFFSET_DISTANCE", "-2.5");

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.offset_distance.value, -2.5);
    assert_eq!(config.offset_distance.source, ConfigSource::Environment);
    assert_eq!(config.extrude_height.value, 7.0);
    assert_eq!(config.extrude_height.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_values_are_ignored() {
    clear_env();
    env::set_var("GEOPROC_EXTRUDE_HEIGHT", "tall");
    env::set_var("GEOPROC_PRESERVE_PROPERTIES", "sometimes");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.extrude_height.value, 10.0);
    assert_eq!(config.extrude_height.source, ConfigSource::Default);
    assert!(config.preserve_properties.value);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var("GEOPROC_PRESERVE_PROPERTIES", "false");
    env::set_var("GEOPROC_EXTRUDE_HEIGHT", "12");

    let mut config = LayeredConfig::with_defaults().load_from_env();
    assert!(!config.preserve_properties.value);

    config.update_from_cli(CliConfigOverrides {
        offset_distance: None,
        extrude_height: Some(20.0),
        preserve_properties: Some(true),
    });

    assert_eq!(config.extrude_height.value, 20.0);
    assert_eq!(config.extrude_height.source, ConfigSource::Cli);
    assert!(config.preserve_properties.value);
    assert_eq!(config.preserve_properties.source, ConfigSource::Cli);

    clear_env();
}

#[test]
#[serial]
fn test_full_precedence_chain() {
    clear_env();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "offset_distance = 2.0\nextrude_height = 2.0\npreserve_properties = false")
        .unwrap();
    env::set_var("GEOPROC_OFFSET_DISTANCE", "3.0");

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();
    config.update_from_cli(CliConfigOverrides {
        offset_distance: Some(4.0),
        ..Default::default()
    });

    let map = config.to_inspection_map();
    assert_eq!(map["offset_distance"], ("4".to_string(), ConfigSource::Cli));
    assert_eq!(map["extrude_height"], ("2".to_string(), ConfigSource::File));
    assert_eq!(map["preserve_properties"], ("false".to_string(), ConfigSource::File));

    clear_env();
}
