//! Line protocol for keeping other controls in sync with the wheel.
//!
//! Every connected client receives the owner events (`chord major 7`, `end`, `top 3`, ...)
//! and may send `top <n>` to rotate the wheel or `reload` to re-read the config.

use crate::events::AppEvent;
use crate::theory::PitchClass;
use async_channel::Sender;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::broadcast::{self, error::RecvError};

pub fn parse_command(line: &str) -> Option<AppEvent> {
    let mut parts = line.split_whitespace();
    match (parts.next()?, parts.next(), parts.next()) {
        ("top", Some(n), None) => n
            .parse::<u8>()
            .ok()
            .and_then(|n| PitchClass::try_from(n).ok())
            .map(AppEvent::SetTop),
        ("reload", None, None) => Some(AppEvent::ConfigReload),
        _ => None,
    }
}

pub fn bind(socket: &Path) -> std::io::Result<UnixListener> {
    // Cleanup old socket if it exists
    if fs_err::metadata(socket).is_ok() {
        let _ = fs_err::remove_file(socket);
    }
    UnixListener::bind(socket)
}

pub async fn run_server(socket: PathBuf, tx: Sender<AppEvent>, outgoing: broadcast::Sender<String>) {
    match bind(&socket) {
        Ok(listener) => serve(listener, tx, outgoing).await,
        Err(e) => log::error!("Failed to bind unix socket {}: {}", socket.display(), e),
    }
}

pub async fn serve(listener: UnixListener, tx: Sender<AppEvent>, outgoing: broadcast::Sender<String>) {
    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                let rx = outgoing.subscribe();
                tokio::spawn(async move {
                    handle_client(stream, tx, rx).await;
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

async fn handle_client(stream: UnixStream, tx: Sender<AppEvent>, mut rx: broadcast::Receiver<String>) {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => match parse_command(&line) {
                    Some(event) => {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    None => log::warn!("Ignoring sync command '{}'", line.trim()),
                },
                _ => break,
            },
            event = rx.recv() => match event {
                Ok(line) => {
                    if writer.write_all(format!("{}\n", line).as_bytes()).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(n)) => log::warn!("Sync client skipped {} events", n),
                Err(RecvError::Closed) => break,
            },
        }
    }
}
