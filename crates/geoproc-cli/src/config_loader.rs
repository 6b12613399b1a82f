//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use geoproc_core::config::{CliConfigOverrides, LayeredConfig, DEFAULT_CONFIG_FILE};
use std::path::{Path, PathBuf};

/// The config file a command reads: the explicit one, or `geoproc.toml`
/// in the working directory
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load layered configuration: defaults, then file, then environment.
///
/// A missing default file is fine; a missing explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<LayeredConfig> {
    let path = config_path(explicit);
    let config = LayeredConfig::with_defaults();

    let config = match explicit {
        Some(_) => config.load_from_file(&path),
        None => config.load_from_optional_file(&path),
    }
    .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    Ok(config.load_from_env())
}

/// Load layered configuration with CLI overrides on top
pub fn load_config_with_overrides(
    explicit: Option<&Path>,
    overrides: CliConfigOverrides,
) -> Result<LayeredConfig> {
    let mut config = load_config(explicit)?;
    config.update_from_cli(overrides);
    Ok(config)
}
