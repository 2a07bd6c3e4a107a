//! Async submission: start, await the client, resolve.

use techxy_common::MessageId;

use super::manager::ConversationSession;
use super::types::SessionError;

impl ConversationSession {
    /// Submit `text` and wait for the reply.
    ///
    /// Returns the id of the resolved assistant message, or `None` for
    /// blank text. Request failures never surface here: they resolve the
    /// placeholder to the failure text.
    pub async fn submit(
        &mut self,
        text: impl Into<String>,
    ) -> Result<Option<MessageId>, SessionError> {
        let Some(pending) = self.begin_submission(text)? else {
            return Ok(None);
        };

        let outcome = self.client.generate(&pending.request).await;
        self.resolve(&pending.id, outcome)?;
        Ok(Some(pending.id))
    }
}
