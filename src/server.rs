//! TCP server for remote play.
//!
//! Each connection gets its own [`SessionController`]; nothing is shared
//! between connections. The loop is strictly request/response: send the
//! board, wait for one line, apply it, repeat.
//!
//! # Environment Variables
//!
//! - `MINESWEEPER_HOST`: bind address (default: "127.0.0.1")
//! - `MINESWEEPER_PORT`: port number (default: 8081)
//! - `MINESWEEPER_READ_TIMEOUT_SECS`: idle time before a session is dropped (default: 300)
//! - `MINESWEEPER_WIDTH`, `MINESWEEPER_HEIGHT`: board size (default: 10 x 10)
//! - `MINESWEEPER_PERCENT_MINES`: mine density and cap for restarts (default: 0.10)
//! - `MINESWEEPER_SEED`: mine layout seed (default: 1)

use std::net::{AddrParseError, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use crate::command::HELP_TEXT;
use crate::config::{DEFAULT_HEIGHT, DEFAULT_PERCENT_MINES, DEFAULT_SEED, DEFAULT_WIDTH};
use crate::error::ProtocolError;
use crate::protocol::{ClientMessage, StateMessage};
use crate::{BoardConfig, Outcome, SessionController};

/// Longest inbound line accepted, newline included.
pub const MAX_LINE_BYTES: usize = 4096;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub read_timeout: Duration,
    pub board: BoardConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8081,
            read_timeout: Duration::from_secs(300),
            board: BoardConfig::default(),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("MINESWEEPER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env_or("MINESWEEPER_PORT", 8081);
        let read_timeout = Duration::from_secs(env_or("MINESWEEPER_READ_TIMEOUT_SECS", 300));

        let board = BoardConfig::new(
            env_or("MINESWEEPER_WIDTH", DEFAULT_WIDTH),
            env_or("MINESWEEPER_HEIGHT", DEFAULT_HEIGHT),
        )
        .with_percent_mines(Some(env_or(
            "MINESWEEPER_PERCENT_MINES",
            DEFAULT_PERCENT_MINES,
        )))
        .with_seed(env_or("MINESWEEPER_SEED", DEFAULT_SEED));

        Self {
            host,
            port,
            read_timeout,
            board,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// Start the TCP server. `ready_tx` receives the bound address once the
/// listener is up.
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    // reject a bad board config before accepting anyone
    config.board.resolve_mine_count()?;

    let listener = TcpListener::bind(config.socket_addr()?).await?;
    let bound = listener.local_addr()?;
    log::info!("Listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut session_counter = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        session_counter += 1;
        let session_id = session_counter;
        log::info!("Session {} connected from {}", session_id, addr);

        let board = config.board.clone();
        let read_timeout = config.read_timeout;
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, session_id, board, read_timeout).await {
                log::warn!("Session {} error: {}", session_id, e);
            }
            log::info!("Session {} closed", session_id);
        });
    }
}

/// Message shown alongside the board after an accepted command.
fn outcome_message(outcome: Outcome) -> Option<String> {
    match outcome {
        Outcome::Help => Some(HELP_TEXT.to_string()),
        Outcome::Won => Some("You win!".to_string()),
        Outcome::Lost => Some("Game over!".to_string()),
        _ => None,
    }
}

/// Runs one session until the peer quits, disconnects, stalls or sends a
/// malformed message.
async fn handle_client(
    socket: TcpStream,
    session_id: usize,
    board: BoardConfig,
    read_timeout: Duration,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let mut session = SessionController::new(board)?;

    let mut message = None;
    let mut line = String::new();

    loop {
        let state = StateMessage::from_session(&session, message.take());
        writer.write_all(state.to_line()?.as_bytes()).await?;
        writer.flush().await?;

        line.clear();
        let mut limited = (&mut reader).take(MAX_LINE_BYTES as u64 + 1);
        let bytes_read = tokio::time::timeout(read_timeout, limited.read_line(&mut line))
            .await
            .map_err(|_| ProtocolError::Timeout(read_timeout))??;
        if bytes_read > MAX_LINE_BYTES {
            return Err(ProtocolError::LineTooLong(MAX_LINE_BYTES).into());
        }
        if bytes_read == 0 {
            log::debug!("Session {} reached end of stream", session_id);
            return Ok(());
        }

        let inbound = ClientMessage::from_line(&line)?;
        log::debug!("Session {} received {:?}", session_id, inbound.command);

        match inbound.command().and_then(|command| session.dispatch(command)) {
            Ok(Outcome::Quit) => break,
            Ok(outcome) => message = outcome_message(outcome),
            Err(e) => {
                log::debug!("Session {} rejected {:?}: {}", session_id, inbound.command, e);
                message = Some(e.to_string());
            }
        }
    }

    let farewell = StateMessage::from_session(&session, Some("Goodbye".to_string()));
    writer.write_all(farewell.to_line()?.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_socket_addr() {
        let config = ServerConfig::default();
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:8081".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_bad_host_is_an_error() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(outcome_message(Outcome::Continue), None);
        assert_eq!(
            outcome_message(Outcome::Help).as_deref(),
            Some(HELP_TEXT)
        );
        assert!(outcome_message(Outcome::Lost).is_some());
    }
}
