//! Transcript -> `generateContent` request.

use crate::wire::{Content, GenerateRequest, Speaker};

use super::types::{Attachment, Message};

/// Marker between the user's text and the attached document text.
pub const ATTACHMENT_SEPARATOR: &str = "\n\n---\n[Attached PDF Content]\n";

/// Build the request for a new submission of `text`.
///
/// `transcript` is the history before the submission. Pending placeholders
/// and system notices are skipped; the new text, followed by the attachment
/// if any, is the final entry.
pub fn project(
    transcript: &[Message],
    text: &str,
    attachment: Option<&Attachment>,
) -> GenerateRequest {
    let mut contents: Vec<Content> = transcript
        .iter()
        .filter(|m| !m.is_pending())
        .filter_map(|m| m.role.speaker().map(|s| Content::new(s, m.text.clone())))
        .collect();

    let final_text = match attachment {
        Some(attachment) => format!("{text}{ATTACHMENT_SEPARATOR}{}", attachment.text),
        None => text.to_string(),
    };
    contents.push(Content::new(Speaker::User, final_text));

    GenerateRequest::new(contents)
}
