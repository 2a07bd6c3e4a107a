//! Where the config file lives, and writing the commented default.

use std::path::{Path, PathBuf};

use techxy_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

/// Directory under the OS config dir that holds `config.toml`.
const APP_DIR: &str = "techxy";
const FILE_NAME: &str = "config.toml";

/// `<config dir>/techxy/config.toml` for the current platform.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or_else(|| ConfigError::ParseError("no config directory on this platform".into()))
}

/// Write the commented template to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_err = |what: &str, at: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("{what} {}: {e}", at.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| io_err("cannot create config directory", parent, e))?;
    }
    std::fs::write(path, default_config_toml())
        .map_err(|e| io_err("cannot write default config to", path, e))?;

    info!(path = %path.display(), "Wrote default config");
    Ok(())
}
