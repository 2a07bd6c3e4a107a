//! Server-mediated transport.
//!
//! `techxy-relay` holds the API key and forwards `generateContent` calls;
//! clients speak the small JSON protocol in [`protocol`] over WebSocket.

mod client;
pub mod protocol;

pub use client::RelayClient;
pub use protocol::{RelayReply, RelayRequest};
