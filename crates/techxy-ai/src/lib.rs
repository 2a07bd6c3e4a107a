//! Conversation core for Techxy Talks.
//!
//! Provides:
//! - the `generateContent` wire types and the `GenerativeClient` seam
//! - a direct Gemini client and a relay-backed client
//! - `ConversationSession`, the transcript owner with optimistic placeholders
//! - page-ordered document text extraction (PDF via `lopdf`)

pub mod document;
pub mod gemini;
pub mod relay;
pub mod session;
pub mod wire;

use async_trait::async_trait;

pub use document::{DocumentError, DocumentLoader, PagedDocument, PdfLoader, Upload};
pub use gemini::{GeminiClient, GeminiConfig};
pub use relay::RelayClient;
pub use session::{
    Attachment, ConversationSession, Message, MessageStatus, PendingReply, Role, SessionError,
};
pub use wire::{Content, GenerateRequest, GenerateResponse, GenerationConfig, Part, Speaker};

/// Sends one request and awaits the structured response.
///
/// Implementations decide where the HTTP call is issued from; the session
/// only depends on this trait.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, AiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("relay error: {0}")]
    Relay(String),
    #[error("client setup error: {0}")]
    Setup(String),
}
