//! Full configuration validation.
//!
//! Each section has its own check; this orchestrator calls them all and
//! collects errors into a single `ConfigError`.

mod helpers;


use crate::schema::TechxyConfig;
use techxy_common::ConfigError;

use helpers::{validate_range, validate_range_f64, validate_scheme};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &TechxyConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_api(&mut errors, config);
    validate_relay(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_api(errors: &mut Vec<String>, config: &TechxyConfig) {
    let api = &config.api;
    validate_scheme(errors, "api.base_url", &api.base_url, &["https://", "http://"]);
    if api.base_url.ends_with('/') {
        errors.push("api.base_url must not end with '/'".into());
    }
    if api.model.trim().is_empty() {
        errors.push("api.model must not be empty".into());
    }
    if api.api_key_env.trim().is_empty() {
        errors.push("api.api_key_env must not be empty".into());
    }
    if let Some(temperature) = api.temperature {
        validate_range_f64(errors, "api.temperature", temperature, 0.0, 2.0);
    }
    if let Some(max) = api.max_output_tokens {
        validate_range(errors, "api.max_output_tokens", max, 1, 65_536);
    }
    validate_range(
        errors,
        "api.connect_timeout_secs",
        api.connect_timeout_secs,
        1,
        120,
    );
}

fn validate_relay(errors: &mut Vec<String>, config: &TechxyConfig) {
    validate_scheme(errors, "relay.url", &config.relay.url, &["ws://", "wss://"]);
    validate_range(errors, "relay.port", config.relay.port, 1024, 65535);
}
