//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use kulture_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Config file picked up from the working directory when --config is absent
pub const DEFAULT_CONFIG_FILE: &str = "kulture.toml";

/// Load layered configuration: defaults, file, environment, then CLI flags
pub fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_file(cli.config.as_deref()) {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(cli_overrides(cli));

    tracing::debug!(backend = %config.backend.value, "Configuration loaded");
    Ok(config)
}

/// An explicit path is always used; the default file only when it exists
fn config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        }
    }
}

fn cli_overrides(cli: &Cli) -> CliConfigOverrides {
    CliConfigOverrides {
        backend: cli.backend.map(Into::into),
        default_anchor: None,
        fixture: cli.fixture.clone(),
        database_url: cli.database_url.clone(),
    }
}
