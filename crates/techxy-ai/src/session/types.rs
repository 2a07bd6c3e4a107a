//! Transcript types and the placeholder state machine.

use serde::{Deserialize, Serialize};
use techxy_common::MessageId;
use tracing::warn;

use crate::wire::{GenerateResponse, Speaker};
use crate::AiError;

/// Reply text when the response decodes but carries no text.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't understand that.";
/// Reply text when the request itself fails.
pub const FAILURE_REPLY: &str = "Failed to fetch response. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// Local notices such as upload announcements. Never sent to the API.
    System,
}

impl Role {
    /// API speaker for this role; `None` for roles that are not projected.
    pub fn speaker(&self) -> Option<Speaker> {
        match self {
            Role::User => Some(Speaker::User),
            Role::Assistant => Some(Speaker::Model),
            Role::System => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Pending,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub status: MessageStatus,
}

impl Message {
    pub(crate) fn user(text: impl Into<String>) -> Self {
        Self::resolved(Role::User, text)
    }

    pub(crate) fn system(text: impl Into<String>) -> Self {
        Self::resolved(Role::System, text)
    }

    pub(crate) fn placeholder() -> Self {
        Self {
            id: MessageId::new(),
            role: Role::Assistant,
            text: String::new(),
            status: MessageStatus::Pending,
        }
    }

    fn resolved(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            text: text.into(),
            status: MessageStatus::Resolved,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == MessageStatus::Pending
    }

    /// Pending -> Resolved. Callers check `is_pending` first.
    pub(crate) fn settle(&mut self, text: String) {
        debug_assert!(self.is_pending());
        self.text = text;
        self.status = MessageStatus::Resolved;
    }
}

/// Text extracted from the most recent upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub text: String,
}

/// A started submission whose request has not been answered yet.
#[derive(Debug, Clone)]
pub struct PendingReply {
    /// Id of the assistant placeholder to resolve.
    pub id: MessageId,
    pub request: crate::wire::GenerateRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("a reply is still pending")]
    Busy,

    #[error("message {0} is not a pending placeholder")]
    NotPending(MessageId),
}

/// The text a placeholder settles to for a given request outcome.
pub fn reply_text(outcome: Result<GenerateResponse, AiError>) -> String {
    match outcome {
        Ok(response) => response
            .reply_text()
            .unwrap_or_else(|| FALLBACK_REPLY.to_string()),
        Err(e) => {
            warn!(error = %e, "generate request failed");
            FAILURE_REPLY.to_string()
        }
    }
}
