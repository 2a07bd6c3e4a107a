//! techxy-relay: WebSocket relay that issues `generateContent` calls on
//! behalf of chat clients.
//!
//! The API key lives only in this process's environment. Clients send
//! `generate` frames and receive `reply` or `error` frames back.

mod connection;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use techxy_ai::{GeminiClient, GeminiConfig, GenerativeClient};
use techxy_common::TechxyError;
use techxy_config::TechxyConfig;
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;

use crate::connection::handle_connection;

#[derive(Parser)]
#[command(name = "techxy-relay", version, about = "Credential-holding relay for Techxy Talks")]
struct Args {
    /// Port to listen on (overrides `relay.port`).
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Config file path override.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(args: &Args) -> Result<TechxyConfig, TechxyError> {
    let config = match args.config {
        Some(ref path) => techxy_config::load_config_from(path)?,
        None => techxy_config::load_config()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), TechxyError> {
    let args = Args::parse();
    let config = load_config(&args)?;

    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| {
            let level = config.logging.level.as_directive();
            format!("techxy_relay={level},techxy_ai={level}")
        });
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| directive.into()),
        )
        .init();

    let api_key = techxy_config::resolve_api_key(&config.api)?;
    let gemini = GeminiClient::new(GeminiConfig::from_settings(&config.api, api_key))
        .map_err(|e| TechxyError::Ai(e.to_string()))?;
    tracing::info!(model = %gemini.model(), "Upstream client ready");
    let client: Arc<dyn GenerativeClient> = Arc::new(gemini);

    let port = args.port.map(u32::from).unwrap_or(config.relay.port);
    let addr = format!("{}:{}", args.host, port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("techxy-relay listening on {}", addr);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let client = Arc::clone(&client);
                tokio::spawn(async move {
                    match accept_async(stream).await {
                        Ok(ws) => handle_connection(ws, addr, client).await,
                        Err(e) => {
                            tracing::warn!(peer = %addr, error = %e, "WS handshake failed");
                        }
                    }
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "TCP accept error");
            }
        }
    }
}
