//! Per-connection handler: answer each `generate` frame in arrival order.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use techxy_ai::relay::{RelayReply, RelayRequest};
use techxy_ai::GenerativeClient;
use tokio_tungstenite::tungstenite::Message;

/// Handle a single WebSocket connection until the client closes it.
pub async fn handle_connection(
    ws: tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>,
    addr: SocketAddr,
    client: Arc<dyn GenerativeClient>,
) {
    let (mut sink, mut stream) = ws.split();
    tracing::debug!(peer = %addr, "Client connected");

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                let reply = respond(client.as_ref(), &text).await;
                let json = match serde_json::to_string(&reply) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::warn!(peer = %addr, error = %e, "Failed to encode reply");
                        break;
                    }
                };
                if sink.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
            Ok(Message::Ping(data)) => {
                let _ = sink.send(Message::Pong(data)).await;
            }
            Ok(Message::Close(_)) => break,
            Err(e) => {
                tracing::debug!(peer = %addr, error = %e, "WS error");
                break;
            }
            _ => {}
        }
    }

    tracing::debug!(peer = %addr, "Client disconnected");
}

/// Turn one client frame into the frame to send back.
pub async fn respond(client: &dyn GenerativeClient, text: &str) -> RelayReply {
    let RelayRequest::Generate {
        request_id,
        request,
    } = match serde_json::from_str::<RelayRequest>(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid relay frame");
            return RelayReply::Error {
                request_id: String::new(),
                message: format!("invalid frame: {e}"),
            };
        }
    };

    match client.generate(&request).await {
        Ok(response) => {
            tracing::info!(request_id = %request_id, "Forwarded request");
            RelayReply::Reply {
                request_id,
                response,
            }
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Upstream request failed");
            RelayReply::Error {
                request_id,
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use techxy_ai::{AiError, GenerateRequest, GenerateResponse};

    /// Echoes the last user text, or fails when it says "fail".
    struct EchoClient;

    #[async_trait]
    impl GenerativeClient for EchoClient {
        async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, AiError> {
            let text = request
                .contents
                .last()
                .and_then(|c| c.text())
                .unwrap_or_default();
            if text == "fail" {
                return Err(AiError::Api {
                    status: 429,
                    body: "quota".into(),
                });
            }
            Ok(GenerateResponse::from_text(format!("echo: {text}")))
        }
    }

    fn frame(request_id: &str, text: &str) -> String {
        serde_json::json!({
            "type": "generate",
            "request_id": request_id,
            "request": {
                "contents": [{ "role": "user", "parts": [{ "text": text }] }],
                "generationConfig": {}
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn forwards_and_tags_reply() {
        let reply = respond(&EchoClient, &frame("abcd1234", "hello")).await;
        match reply {
            RelayReply::Reply {
                request_id,
                response,
            } => {
                assert_eq!(request_id, "abcd1234");
                assert_eq!(response.reply_text().as_deref(), Some("echo: hello"));
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[tokio::test]
    async fn upstream_failure_becomes_error_frame() {
        let reply = respond(&EchoClient, &frame("0000ffff", "fail")).await;
        match reply {
            RelayReply::Error {
                request_id,
                message,
            } => {
                assert_eq!(request_id, "0000ffff");
                assert!(message.contains("429"));
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparseable_frame_gets_untagged_error() {
        let reply = respond(&EchoClient, "{\"type\":\"subscribe\"}").await;
        assert!(matches!(reply, RelayReply::Error { ref request_id, .. } if request_id.is_empty()));
    }

    #[tokio::test]
    async fn answers_frames_over_a_socket_until_closed() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (stream, peer) = listener.accept().await.unwrap();
            let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            handle_connection(ws, peer, Arc::new(EchoClient)).await;
        });

        let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
            .await
            .unwrap();

        ws.send(Message::Ping(b"beat".to_vec().into())).await.unwrap();
        ws.send(Message::Text(frame("1234abcd", "over the wire").into()))
            .await
            .unwrap();
        ws.send(Message::Text("not json".to_string().into()))
            .await
            .unwrap();

        let mut saw_pong = false;
        let mut replies = Vec::new();
        while replies.len() < 2 {
            match ws.next().await.unwrap().unwrap() {
                Message::Pong(data) => {
                    assert_eq!(&data[..], b"beat");
                    saw_pong = true;
                }
                Message::Text(text) => {
                    replies.push(serde_json::from_str::<RelayReply>(&text).unwrap());
                }
                other => panic!("unexpected frame: {other:?}"),
            }
        }
        assert!(saw_pong);

        match &replies[0] {
            RelayReply::Reply {
                request_id,
                response,
            } => {
                assert_eq!(request_id, "1234abcd");
                assert_eq!(response.reply_text().as_deref(), Some("echo: over the wire"));
            }
            other => panic!("unexpected reply: {other:?}"),
        }
        assert!(matches!(replies[1], RelayReply::Error { ref request_id, .. } if request_id.is_empty()));

        ws.close(None).await.unwrap();
        tokio::time::timeout(std::time::Duration::from_secs(5), server)
            .await
            .expect("handler did not stop after close")
            .unwrap();
    }
}
