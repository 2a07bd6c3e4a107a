//! GenerativeClient implementation for GeminiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::wire::{GenerateRequest, GenerateResponse};
use crate::{AiError, GenerativeClient};

use super::client::GeminiClient;

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, AiError> {
        let body = self.prepare(request);

        debug!(
            model = %self.config.model,
            contents = body.contents.len(),
            "Gemini API request"
        );

        let response = self
            .http
            .post(self.api_url())
            .query(&[("key", self.config.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| AiError::Parse(e.without_url().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::GeminiConfig;
    use crate::session::{reply_text, FAILURE_REPLY};
    use crate::wire::{Content, Speaker};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer one HTTP request with `status` and `body`; the handle yields
    /// the raw request that was received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&chunk[..n]);
                if let Some(end) = received.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&received[..end]).to_lowercase();
                    let length = head
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if received.len() >= end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
            String::from_utf8_lossy(&received).into_owned()
        });
        (format!("http://{addr}/v1beta/models"), handle)
    }

    fn client_for(base_url: String) -> GeminiClient {
        GeminiClient::new(
            GeminiConfig::new("secret-key")
                .with_base_url(base_url)
                .with_model("gemini-test"),
        )
        .unwrap()
    }

    fn hello() -> GenerateRequest {
        GenerateRequest::new(vec![Content::new(Speaker::User, "hi")])
    }

    #[tokio::test]
    async fn successful_reply_is_decoded_and_trimmed() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":" Hello "}],"role":"model"}}]}"#,
        )
        .await;

        let response = client_for(base).generate(&hello()).await.unwrap();
        assert_eq!(response.reply_text().as_deref(), Some("Hello"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/gemini-test:generateContent?key=secret-key "));
        assert!(request.contains(r#""contents":[{"role":"user","parts":[{"text":"hi"}]}]"#));
        assert!(request.contains(r#""generationConfig":{}"#));
    }

    #[tokio::test]
    async fn server_error_becomes_api_error() {
        let (base, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

        let outcome = client_for(base).generate(&hello()).await;
        match outcome {
            Err(AiError::Api { status, ref body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("boom"));
            }
            ref other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(reply_text(outcome), FAILURE_REPLY);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn undecodable_body_becomes_parse_error() {
        let (base, server) = serve_once("200 OK", "not json").await;

        let outcome = client_for(base).generate(&hello()).await;
        assert!(matches!(outcome, Err(AiError::Parse(_))));
        assert_eq!(reply_text(outcome), FAILURE_REPLY);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn errors_never_carry_the_key() {
        let (base, server) = serve_once("200 OK", "not json").await;

        let err = client_for(base).generate(&hello()).await.unwrap_err();
        assert!(!err.to_string().contains("secret-key"));
        server.await.unwrap();
    }
}
