//! ConversationSession struct, transcript access and the two-phase
//! submission API.

use std::sync::Arc;

use techxy_common::MessageId;
use tracing::debug;

use crate::wire::GenerateResponse;
use crate::{AiError, GenerativeClient};

use super::projection::project;
use super::types::{reply_text, Attachment, Message, PendingReply, SessionError};

/// A single conversation: transcript, current attachment and client.
///
/// The session is the only writer of its transcript. Callers that issue
/// requests on other tasks send the outcome back to the owning task and
/// call [`ConversationSession::resolve`] there.
pub struct ConversationSession {
    /// Append-only, in submission order.
    pub(super) transcript: Vec<Message>,
    /// Last uploaded document, appended to every later submission.
    pub(super) attachment: Option<Attachment>,
    pub(super) client: Arc<dyn GenerativeClient>,
}

impl ConversationSession {
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self {
            transcript: Vec::new(),
            attachment: None,
            client,
        }
    }

    /// Start a submission.
    ///
    /// Blank text is a no-op (`Ok(None)`). Otherwise appends the user
    /// message, untrimmed, and a pending assistant placeholder, and returns
    /// the request to issue. Refused with `Busy` while another reply is
    /// pending.
    pub fn begin_submission(
        &mut self,
        text: impl Into<String>,
    ) -> Result<Option<PendingReply>, SessionError> {
        let text = text.into();
        if text.trim().is_empty() {
            debug!("ignoring blank submission");
            return Ok(None);
        }
        if self.is_pending() {
            return Err(SessionError::Busy);
        }

        let request = project(&self.transcript, &text, self.attachment.as_ref());

        self.transcript.push(Message::user(text));
        let placeholder = Message::placeholder();
        let id = placeholder.id.clone();
        self.transcript.push(placeholder);

        debug!(
            placeholder = %id,
            contents = request.contents.len(),
            attachment = self.attachment.is_some(),
            "submission started"
        );
        Ok(Some(PendingReply { id, request }))
    }

    /// Settle the placeholder `id` with the outcome of its request.
    pub fn resolve(
        &mut self,
        id: &MessageId,
        outcome: Result<GenerateResponse, AiError>,
    ) -> Result<&Message, SessionError> {
        let message = self
            .transcript
            .iter_mut()
            .find(|m| &m.id == id && m.is_pending())
            .ok_or_else(|| SessionError::NotPending(id.clone()))?;

        message.settle(reply_text(outcome));
        debug!(placeholder = %id, "placeholder resolved");
        Ok(&*message)
    }

    /// Read-only view of the transcript.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    /// Whether a placeholder is waiting for its reply.
    pub fn is_pending(&self) -> bool {
        self.transcript.iter().any(Message::is_pending)
    }

    pub fn can_submit(&self) -> bool {
        !self.is_pending()
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// The client requests should be issued with.
    pub fn client(&self) -> Arc<dyn GenerativeClient> {
        Arc::clone(&self.client)
    }
}
