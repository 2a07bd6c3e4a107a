//! Plain-text rendering of transcript entries.

use techxy_ai::{Message, Role};

pub const BANNER: &str = "Techxy Talks\nChat with Gemini AI\n";
pub const TYPING: &str = "Typing...";
pub const HELP: &str = "Type a message and press Enter.\n\
  /attach <file.pdf>  attach a PDF to the following messages\n\
  /help               show this help\n\
  /quit               leave";

pub fn message(msg: &Message) -> String {
    if msg.is_pending() {
        return format!("gemini> {TYPING}");
    }
    match msg.role {
        Role::User => format!("you> {}", msg.text),
        Role::Assistant => format!("gemini> {}", msg.text),
        Role::System => format!("** {} **", msg.text),
    }
}
