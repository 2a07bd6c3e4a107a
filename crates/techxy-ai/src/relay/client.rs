//! GenerativeClient that forwards through `techxy-relay`.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use techxy_common::new_correlation_id;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use crate::wire::{GenerateRequest, GenerateResponse};
use crate::{AiError, GenerativeClient};

use super::protocol::{RelayReply, RelayRequest};

/// Opens one WebSocket connection per request. The API key stays on the
/// relay host.
pub struct RelayClient {
    url: String,
}

impl RelayClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GenerativeClient for RelayClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, AiError> {
        let request_id = new_correlation_id();
        let frame = serde_json::to_string(&RelayRequest::Generate {
            request_id: request_id.clone(),
            request: request.clone(),
        })
        .map_err(|e| AiError::Parse(e.to_string()))?;

        debug!(url = %self.url, request_id = %request_id, "Relay request");

        let (ws, _) = connect_async(self.url.as_str())
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;
        let (mut sink, mut stream) = ws.split();

        sink.send(Message::Text(frame.into()))
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        while let Some(frame) = stream.next().await {
            match frame.map_err(|e| AiError::Network(e.to_string()))? {
                Message::Text(text) => {
                    let reply: RelayReply =
                        serde_json::from_str(&text).map_err(|e| AiError::Parse(e.to_string()))?;
                    // An empty id answers a frame the relay could not parse: ours.
                    if !reply.request_id().is_empty() && reply.request_id() != request_id {
                        debug!(got = %reply.request_id(), "Ignoring reply for another request");
                        continue;
                    }
                    let _ = sink.send(Message::Close(None)).await;
                    return match reply {
                        RelayReply::Reply { response, .. } => Ok(response),
                        RelayReply::Error { message, .. } => Err(AiError::Relay(message)),
                    };
                }
                Message::Ping(data) => {
                    let _ = sink.send(Message::Pong(data)).await;
                }
                Message::Close(_) => break,
                _ => {}
            }
        }

        Err(AiError::Relay("connection closed before reply".into()))
    }
}
