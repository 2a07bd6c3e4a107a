use serde::{Deserialize, Serialize};

/// Generative-language API settings.
///
/// The key itself is read from the environment variable named by
/// `api_key_env` and handed to the client at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the models collection, without a trailing slash.
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    /// Sampling temperature (0.0-2.0). Omitted from requests when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// TCP connect timeout in seconds (1-120).
    pub connect_timeout_secs: u32,
    /// Whole-request timeout in seconds; 0 disables it.
    pub request_timeout_secs: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            model: "gemini-2.0-flash".into(),
            api_key_env: "GEMINI_API_KEY".into(),
            temperature: None,
            max_output_tokens: None,
            connect_timeout_secs: 10,
            request_timeout_secs: 0,
        }
    }
}
