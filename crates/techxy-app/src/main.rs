//! techxy: terminal chat with Gemini, with optional PDF context.

mod chat_loop;
mod cli;
mod client;
mod command;
mod render;

use techxy_ai::{ConversationSession, PdfLoader};
use techxy_common::TechxyError;
use techxy_config::TechxyConfig;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

/// Load environment variables from a `.env` file (KEY=VALUE lines).
///
/// Variables already set in the environment win.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}

fn load_config(args: &Args) -> Result<TechxyConfig, TechxyError> {
    let mut config = match args.config {
        Some(ref path) => techxy_config::load_config_from(path)?,
        None => techxy_config::load_config()?,
    };
    args.apply(&mut config);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), TechxyError> {
    load_dotenv();

    let args = cli::parse();
    let config = load_config(&args)?;

    if args.print_config {
        println!("{}", techxy_config::config_to_json(&config));
        return Ok(());
    }

    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| {
            let level = config.logging.level.as_directive();
            format!("techxy_app={level},techxy_ai={level}")
        });
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| directive.into()))
        .init();

    tracing::info!("Techxy v{} starting...", env!("CARGO_PKG_VERSION"));

    let client = client::build_client(&config)?;
    let mut session = ConversationSession::new(client);

    let mut stdout = std::io::stdout();
    if let Some(ref path) = args.attach {
        chat_loop::attach(&mut session, &PdfLoader, path, &mut stdout).await?;
    }

    let stdin = BufReader::new(tokio::io::stdin());
    chat_loop::run(&mut session, &PdfLoader, stdin, &mut stdout).await?;

    tracing::info!(messages = session.len(), "Shutdown complete");
    Ok(())
}
