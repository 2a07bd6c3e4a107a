use std::path::PathBuf;

use clap::Parser;
use techxy_config::{TechxyConfig, TransportMode};

/// Techxy Talks: chat with Gemini from the terminal.
#[derive(Parser, Debug)]
#[command(name = "techxy", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Model override (for example gemini-1.5-pro).
    #[arg(short, long)]
    pub model: Option<String>,

    /// Send requests through the relay at this WebSocket URL.
    #[arg(long)]
    pub relay: Option<String>,

    /// PDF to attach before the first message.
    #[arg(short, long)]
    pub attach: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut TechxyConfig) {
        if let Some(ref model) = self.model {
            config.api.model = model.clone();
        }
        if let Some(ref url) = self.relay {
            config.transport.mode = TransportMode::Relay;
            config.relay.url = url.clone();
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
