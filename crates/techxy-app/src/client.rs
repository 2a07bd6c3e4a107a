//! Pick the outbound transport from config.

use std::sync::Arc;

use techxy_ai::{GeminiClient, GeminiConfig, GenerativeClient, RelayClient};
use techxy_common::TechxyError;
use techxy_config::{TechxyConfig, TransportMode};
use tracing::info;

pub fn build_client(config: &TechxyConfig) -> Result<Arc<dyn GenerativeClient>, TechxyError> {
    match config.transport.mode {
        TransportMode::Relay => {
            let relay = RelayClient::new(config.relay.url.clone());
            info!(url = %relay.url(), "Sending requests through relay");
            Ok(Arc::new(relay))
        }
        TransportMode::Direct => {
            let api_key = techxy_config::resolve_api_key(&config.api)?;
            let client = GeminiClient::new(GeminiConfig::from_settings(&config.api, api_key))
                .map_err(|e| TechxyError::Ai(e.to_string()))?;
            info!(model = %client.model(), "Calling the Gemini API directly");
            Ok(Arc::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use techxy_common::ConfigError;

    #[test]
    fn relay_mode_needs_no_key() {
        let mut config = TechxyConfig::default();
        config.transport.mode = TransportMode::Relay;
        config.api.api_key_env = "TECHXY_APP_TEST_UNSET_KEY".into();
        std::env::remove_var("TECHXY_APP_TEST_UNSET_KEY");
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn direct_mode_requires_key() {
        let mut config = TechxyConfig::default();
        config.api.api_key_env = "TECHXY_APP_TEST_MISSING_KEY".into();
        std::env::remove_var("TECHXY_APP_TEST_MISSING_KEY");
        let err = build_client(&config).err().unwrap();
        assert!(matches!(
            err,
            TechxyError::Config(ConfigError::MissingCredential(_))
        ));
    }

    #[test]
    fn direct_mode_with_key_builds() {
        let mut config = TechxyConfig::default();
        config.api.api_key_env = "TECHXY_APP_TEST_PRESENT_KEY".into();
        std::env::set_var("TECHXY_APP_TEST_PRESENT_KEY", "k");
        assert!(build_client(&config).is_ok());
    }
}
