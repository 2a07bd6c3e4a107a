//! `generateContent` request and response bodies.
//!
//! Every response field is optional: a body that decodes but lacks the
//! reply text is an unhelpful answer, not an error.

use serde::{Deserialize, Serialize};

/// Speaker of a request entry as the API names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: Speaker,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn new(role: Speaker, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Text of the first part, if any.
    pub fn text(&self) -> Option<&str> {
        self.parts.first().map(|p| p.text.as_str())
    }
}

/// Sampling options. Unset fields are omitted, so the default serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(default)]
    pub generation_config: GenerationConfig,
}

impl GenerateRequest {
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            generation_config: GenerationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
}

impl GenerateResponse {
    /// A response carrying a single text reply.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: Some(vec![Candidate {
                content: Some(CandidateContent {
                    parts: Some(vec![ResponsePart {
                        text: Some(text.into()),
                    }]),
                }),
            }]),
        }
    }

    /// Trimmed `candidates[0].content.parts[0].text`; `None` when absent or blank.
    pub fn reply_text(&self) -> Option<String> {
        let text = self
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .first()?
            .text
            .as_deref()?
            .trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_in_api_shape() {
        let request = GenerateRequest::new(vec![
            Content::new(Speaker::User, "hi"),
            Content::new(Speaker::Model, "hello"),
        ]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "hi" }] },
                    { "role": "model", "parts": [{ "text": "hello" }] }
                ],
                "generationConfig": {}
            })
        );
    }

    #[test]
    fn generation_config_uses_camel_case_when_set() {
        let config = GenerationConfig {
            temperature: Some(0.5),
            max_output_tokens: Some(256),
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value, json!({ "temperature": 0.5, "maxOutputTokens": 256 }));
    }

    #[test]
    fn reply_text_reads_first_part() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Hello" }], "role": "model" } }],
            "usageMetadata": { "promptTokenCount": 3 }
        }))
        .unwrap();
        assert_eq!(response.reply_text().as_deref(), Some("Hello"));
    }

    #[test]
    fn reply_text_is_trimmed() {
        let response = GenerateResponse::from_text("  spaced out \n");
        assert_eq!(response.reply_text().as_deref(), Some("spaced out"));
    }

    #[test]
    fn reply_text_absent_at_each_level() {
        for body in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": {} }] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{}] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": "   " }] } }] }),
            json!({ "candidates": null }),
        ] {
            let response: GenerateResponse = serde_json::from_value(body.clone()).unwrap();
            assert_eq!(response.reply_text(), None, "body: {body}");
        }
    }
}
