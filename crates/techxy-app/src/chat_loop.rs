//! Terminal event loop.
//!
//! The loop task owns the session. Requests run on spawned tasks and send
//! their outcome back over a channel, so every transcript mutation happens
//! here.

use std::io::Write;
use std::path::Path;

use techxy_ai::{
    AiError, ConversationSession, DocumentLoader, GenerateResponse, SessionError, Upload,
};
use techxy_common::{MessageId, TechxyError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::command::Command;
use crate::render;

type Outcome = (MessageId, Result<GenerateResponse, AiError>);

/// Run until `/quit`, or until input ends and no reply is pending.
pub async fn run<R, W>(
    session: &mut ConversationSession,
    loader: &dyn DocumentLoader,
    input: R,
    out: &mut W,
) -> Result<(), TechxyError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (tx, mut rx) = mpsc::channel::<Outcome>(4);
    let mut lines = input.lines();
    let mut input_open = true;

    writeln!(out, "{}", render::BANNER)?;

    loop {
        if !input_open && !session.is_pending() {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    debug!("input closed");
                    input_open = false;
                    continue;
                };
                match Command::parse(&line) {
                    Command::Quit => break,
                    Command::Help => writeln!(out, "{}", render::HELP)?,
                    Command::Unknown(cmd) => {
                        writeln!(out, "Unknown command {cmd}. Try /help.")?;
                    }
                    Command::Attach(path) => attach(session, loader, &path, out).await?,
                    Command::Send(text) => submit(session, text, &tx, out)?,
                }
            }
            Some((id, outcome)) = rx.recv() => {
                match session.resolve(&id, outcome) {
                    Ok(message) => writeln!(out, "{}", render::message(message))?,
                    Err(e) => warn!(error = %e, "dropping reply"),
                }
            }
        }
        out.flush()?;
    }

    Ok(())
}

fn submit<W: Write>(
    session: &mut ConversationSession,
    text: String,
    tx: &mpsc::Sender<Outcome>,
    out: &mut W,
) -> Result<(), TechxyError> {
    let pending = match session.begin_submission(text) {
        Ok(Some(pending)) => pending,
        Ok(None) => return Ok(()),
        Err(SessionError::Busy) => {
            writeln!(out, "Still waiting for the previous reply.")?;
            return Ok(());
        }
        Err(e) => return Err(TechxyError::Other(e.to_string())),
    };

    if let Some(placeholder) = session.transcript().last() {
        writeln!(out, "{}", render::message(placeholder))?;
    }

    let client = session.client();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = client.generate(&pending.request).await;
        if tx.send((pending.id, outcome)).await.is_err() {
            debug!("session gone before reply arrived");
        }
    });
    Ok(())
}

pub(crate) async fn attach<W: Write>(
    session: &mut ConversationSession,
    loader: &dyn DocumentLoader,
    path: &Path,
    out: &mut W,
) -> Result<(), TechxyError> {
    let upload = match Upload::read(path).await {
        Ok(upload) => upload,
        Err(e) => {
            writeln!(out, "Could not read {}: {e}", path.display())?;
            return Ok(());
        }
    };

    match session.ingest_document(upload, loader).await {
        Ok(Some(notice)) => writeln!(out, "{}", render::message(notice))?,
        Ok(None) => writeln!(out, "Only PDF files can be attached.")?,
        Err(e) => writeln!(out, "Could not attach {}: {e}", path.display())?,
    }
    Ok(())
}
