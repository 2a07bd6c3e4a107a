//! Conversation session management.
//!
//! A `ConversationSession` owns the append-only transcript, the current
//! attachment and the client. Each submission appends the user message and
//! a pending assistant placeholder in one synchronous step; the placeholder
//! is resolved exactly once when the request settles.

mod chat;
mod documents;
mod manager;
pub mod projection;
mod types;


pub use manager::ConversationSession;
pub use types::{
    reply_text, Attachment, Message, MessageStatus, PendingReply, Role, SessionError,
    FAILURE_REPLY, FALLBACK_REPLY,
};
