//! Locating and loading the optional game config file.

use std::path::{Path, PathBuf};

use delve_core::{ConfigError, GameConfig};
use directories::ProjectDirs;
use tracing::{debug, info};

use crate::APP_NAME;

pub const CONFIG_FILE_NAME: &str = "delve.toml";

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Reads `path` when it exists. A missing file means defaults; a malformed one is an error.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig, ConfigError> {
    match path {
        Some(path) if path.exists() => {
            info!(path = %path.display(), "loading game config");
            GameConfig::load(path)
        }
        Some(path) => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(GameConfig::default())
        }
        None => Ok(GameConfig::default()),
    }
}
