//! Gemini API client struct and request preparation.

use crate::wire::GenerateRequest;
use crate::AiError;

use super::config::GeminiConfig;

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AiError::Setup(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub(crate) fn api_url(&self) -> String {
        format!("{}/{}:generateContent", self.config.base_url, self.config.model)
    }

    /// Fill configured sampling options the caller left unset.
    pub(crate) fn prepare(&self, request: &GenerateRequest) -> GenerateRequest {
        let mut body = request.clone();
        let generation = &mut body.generation_config;
        if generation.temperature.is_none() {
            generation.temperature = self.config.temperature;
        }
        if generation.max_output_tokens.is_none() {
            generation.max_output_tokens = self.config.max_output_tokens;
        }
        body
    }
}
