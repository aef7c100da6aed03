//! Line-delimited JSON command server over a Unix socket.
//!
//! Each request line is `{"command": ..., "payload": ...}` and is answered
//! by one envelope line. Every committed change is also pushed to every
//! connection as an event line, interleaved with responses.

use std::path::PathBuf;
use std::sync::Arc;

use nook_service::{NotesError, NotesService, Response};
use nook_types::EventMessage;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

/// The command server.
pub struct RpcServer {
    service: Arc<NotesService>,
    socket_path: PathBuf,
}

impl RpcServer {
    pub fn new(service: Arc<NotesService>, socket_path: PathBuf) -> Self {
        Self {
            service,
            socket_path,
        }
    }

    /// Run the server, accepting connections.
    pub async fn run(&self) -> anyhow::Result<()> {
        // Remove stale socket file
        let _ = std::fs::remove_file(&self.socket_path);

        let listener = UnixListener::bind(&self.socket_path)?;
        info!(path = ?self.socket_path, "command server listening");

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let service = self.service.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(service, stream).await {
                            warn!("Connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    error!("Accept error: {}", e);
                }
            }
        }
    }
}

/// Serve one client until it disconnects.
async fn handle_connection(
    service: Arc<NotesService>,
    stream: tokio::net::UnixStream,
) -> anyhow::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();
    let mut events = service.events().subscribe();
    debug!("client connected");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break; // EOF
                };
                if line.trim().is_empty() {
                    continue;
                }
                let response = match serde_json::from_str::<serde_json::Value>(&line) {
                    Ok(request) => service.handle_request(request).await,
                    Err(e) => Response::failure(NotesError::InvalidParams(e.to_string()).to_string()),
                };
                write_line(&mut writer, &response).await?;
            }
            event = events.recv() => match event {
                Ok(event) => write_line(&mut writer, &EventMessage::from(event)).await?,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "connection lagged, events dropped");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    debug!("client disconnected");
    Ok(())
}

async fn write_line<W, T>(writer: &mut W, message: &T) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut json = serde_json::to_string(message)?;
    json.push('\n');
    writer.write_all(json.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
