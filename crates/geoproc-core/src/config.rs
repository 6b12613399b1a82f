use crate::error::{GeoprocError, Result};
use crate::models::{ProcessingDefaults, DEFAULT_EXTRUDE_HEIGHT, DEFAULT_OFFSET_DISTANCE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "geoproc.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for geoproc
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub offset_distance: ConfigValue<f64>,
    pub extrude_height: ConfigValue<f64>,
    pub preserve_properties: ConfigValue<bool>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            offset_distance: ConfigValue::new(DEFAULT_OFFSET_DISTANCE, ConfigSource::Default),
            extrude_height: ConfigValue::new(DEFAULT_EXTRUDE_HEIGHT, ConfigSource::Default),
            preserve_properties: ConfigValue::new(true, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeoprocError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeoprocError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(distance) = file_config.offset_distance {
            self.offset_distance.update(require_finite("offset_distance", distance)?, ConfigSource::File);
        }

        if let Some(height) = file_config.extrude_height {
            self.extrude_height.update(require_finite("extrude_height", height)?, ConfigSource::File);
        }

        if let Some(preserve) = file_config.preserve_properties {
            self.preserve_properties.update(preserve, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load the file only if it exists
    pub fn load_from_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().is_file() {
            self.load_from_file(path)
        } else {
            tracing::debug!(path = %path.as_ref().display(), "No config file found, using defaults");
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOPROC_OFFSET_DISTANCE
        if let Ok(value) = env::var("GEOPROC_OFFSET_DISTANCE") {
            match parse_float("offset_distance", &value) {
                Ok(distance) => self.offset_distance.update(distance, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOPROC_OFFSET_DISTANCE value '{}': expected a finite number",
                    value
                ),
            }
        }

        // GEOPROC_EXTRUDE_HEIGHT
        if let Ok(value) = env::var("GEOPROC_EXTRUDE_HEIGHT") {
            match parse_float("extrude_height", &value) {
                Ok(height) => self.extrude_height.update(height, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOPROC_EXTRUDE_HEIGHT value '{}': expected a finite number",
                    value
                ),
            }
        }

        // GEOPROC_PRESERVE_PROPERTIES
        if let Ok(value) = env::var("GEOPROC_PRESERVE_PROPERTIES") {
            match parse_bool("preserve_properties", &value) {
                Ok(preserve) => self.preserve_properties.update(preserve, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOPROC_PRESERVE_PROPERTIES value '{}': expected true or false",
                    value
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(distance) = overrides.offset_distance {
            self.offset_distance.update(distance, ConfigSource::Cli);
        }

        if let Some(height) = overrides.extrude_height {
            self.extrude_height.update(height, ConfigSource::Cli);
        }

        if let Some(preserve) = overrides.preserve_properties {
            self.preserve_properties.update(preserve, ConfigSource::Cli);
        }
    }

    /// Effective defaults handed to the processor
    pub fn processing_defaults(&self) -> ProcessingDefaults {
        ProcessingDefaults {
            offset_distance: self.offset_distance.value,
            extrude_height: self.extrude_height.value,
            preserve_properties: self.preserve_properties.value,
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "offset_distance".to_string(),
            (self.offset_distance.value.to_string(), self.offset_distance.source),
        );

        map.insert(
            "extrude_height".to_string(),
            (self.extrude_height.value.to_string(), self.extrude_height.source),
        );

        map.insert(
            "preserve_properties".to_string(),
            (self.preserve_properties.value.to_string(), self.preserve_properties.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    offset_distance: Option<f64>,
    extrude_height: Option<f64>,
    preserve_properties: Option<bool>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub offset_distance: Option<f64>,
    pub extrude_height: Option<f64>,
    pub preserve_properties: Option<bool>,
}

/// Parse a finite float setting
pub fn parse_float(key: &str, s: &str) -> Result<f64> {
    let value = s.trim().parse::<f64>().map_err(|_| GeoprocError::ConfigInvalid {
        key: key.to_string(),
        reason: format!("Invalid number: {}", s),
    })?;
    require_finite(key, value)
}

/// Parse a boolean setting
pub fn parse_bool(key: &str, s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(GeoprocError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("Invalid boolean: {}. Use true or false", s),
        }),
    }
}

fn require_finite(key: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeoprocError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("{} is not a finite number", value),
        })
    }
}
