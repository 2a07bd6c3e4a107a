//! Relay wire protocol: one JSON text frame per message, tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::wire::{GenerateRequest, GenerateResponse};

/// Frames a client sends to the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RelayRequest {
    #[serde(rename = "generate")]
    Generate {
        request_id: String,
        request: GenerateRequest,
    },
}

/// Frames the relay sends back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RelayReply {
    #[serde(rename = "reply")]
    Reply {
        request_id: String,
        response: GenerateResponse,
    },

    /// `request_id` is empty when the offending frame could not be parsed.
    #[serde(rename = "error")]
    Error { request_id: String, message: String },
}

impl RelayReply {
    pub fn request_id(&self) -> &str {
        match self {
            RelayReply::Reply { request_id, .. } | RelayReply::Error { request_id, .. } => {
                request_id
            }
        }
    }
}
