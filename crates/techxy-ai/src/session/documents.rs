//! Attaching uploaded documents to the session.

use tracing::{debug, info};

use crate::document::{extract_text, DocumentError, DocumentLoader, Upload};

use super::manager::ConversationSession;
use super::types::{Attachment, Message};

impl ConversationSession {
    /// Extract `upload` and make it the attachment for later submissions.
    ///
    /// Non-PDF uploads are ignored (`Ok(None)`). On success the previous
    /// attachment is replaced and an upload notice is appended. On error the
    /// session is left untouched.
    pub async fn ingest_document(
        &mut self,
        upload: Upload,
        loader: &dyn DocumentLoader,
    ) -> Result<Option<&Message>, DocumentError> {
        if !upload.is_pdf() {
            debug!(file = %upload.file_name, "ignoring non-PDF upload");
            return Ok(None);
        }

        let Upload { file_name, bytes } = upload;
        let document = loader.open(bytes).await?;
        let text = extract_text(document.as_ref()).await?;

        info!(
            file = %file_name,
            pages = document.page_count(),
            chars = text.len(),
            "document attached"
        );

        self.transcript.push(Message::system(format!(
            "\u{2705} 1 PDF uploaded successfully: \"{file_name}\""
        )));
        self.attachment = Some(Attachment { file_name, text });
        Ok(self.transcript.last())
    }
}
