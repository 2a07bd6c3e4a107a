//! Techxy configuration system.
//!
//! TOML-based configuration with full validation. All config sections use
//! sensible defaults so partial configs work out of the box. The API
//! credential is never stored in the file: the config only names the
//! environment variable that holds it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use techxy_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    ApiConfig, LogLevel, LoggingConfig, RelayConfig, TechxyConfig, TransportConfig, TransportMode,
};

use std::path::Path;

use techxy_common::ConfigError;

/// Load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// if none exists, and validates the result.
pub fn load_config() -> Result<TechxyConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate config from an explicit path (the `--config` override).
pub fn load_config_from(path: &Path) -> Result<TechxyConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Read the API key from the environment variable the config names.
///
/// Only the binaries call this; the key is then handed to the client.
pub fn resolve_api_key(api: &ApiConfig) -> Result<String, ConfigError> {
    std::env::var(&api.api_key_env)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingCredential(api.api_key_env.clone()))
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &TechxyConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
