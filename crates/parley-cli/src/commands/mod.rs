//! CLI command implementations.

pub mod config;
pub mod init;
pub mod read;
pub mod segment;
pub mod sniff;

use anyhow::{Context, Result};
use parley_config::{AppPaths, Config};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the application paths.
pub fn get_paths() -> Result<AppPaths> {
    AppPaths::new().context("Failed to determine application directories")
}

/// The config file in use: the one given on the command line, else the default.
pub fn config_file(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(expand_path(&path.to_string_lossy())),
        None => Ok(get_paths()?.config_file),
    }
}

/// Load the configuration and apply its UI settings.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = config_file(explicit)?;
    let config = Config::load_from(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    debug!("Using config {}", path.display());

    if !config.ui.color {
        colored::control::set_override(false);
    }

    Ok(config)
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
