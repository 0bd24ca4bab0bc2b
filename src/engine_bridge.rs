//! Talks to an external UCI engine process.
//!
//! Each request spawns the engine, sets it up, asks for one position and
//! waits for `bestmove`. Every failure, including the timeout, becomes "no
//! move" so the caller can fall back.

use crate::collaborator::SearchCollaborator;
use crate::config::Config;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestMoveLine {
    Move(String),
    /// The engine reported `(none)`.
    NoMove,
}

/// Recognises `bestmove <move> [ponder <move>]`, case-insensitively.
pub fn parse_bestmove_line(line: &str) -> Option<BestMoveLine> {
    let mut tokens = line.split_whitespace();
    tokens.find(|t| t.eq_ignore_ascii_case("bestmove"))?;
    match tokens.next()? {
        "(none)" | "0000" => Some(BestMoveLine::NoMove),
        mv => Some(BestMoveLine::Move(mv.to_string())),
    }
}

#[derive(Debug, Clone)]
pub struct UciEngine {
    path: PathBuf,
    threads: usize,
    hash_mb: usize,
    timeout: Duration,
}

impl UciEngine {
    pub fn new(
        path: impl Into<PathBuf>,
        threads: usize,
        hash_mb: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            path: path.into(),
            threads: threads.max(1),
            hash_mb,
            timeout,
        }
    }

    /// `None` when no engine executable is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let path = config.engine_path.as_ref()?;
        Some(Self::new(
            path.clone(),
            config.engine_threads,
            config.engine_hash_mb,
            config.engine_timeout(),
        ))
    }

    /// The command script sent for one search.
    pub fn commands(&self, fen: &str, depth: u32) -> Vec<String> {
        vec![
            "uci".to_string(),
            format!("setoption name Threads value {}", self.threads),
            format!("setoption name Hash value {}", self.hash_mb),
            "isready".to_string(),
            "ucinewgame".to_string(),
            format!("position fen {}", fen),
            format!("go depth {}", depth),
        ]
    }

    /// Best move in engine notation, or `None` if the engine gave none in time.
    pub async fn search(&self, fen: &str, depth: u32) -> Option<String> {
        match tokio::time::timeout(self.timeout, self.exchange(fen, depth)).await {
            Ok(Ok(Some(BestMoveLine::Move(mv)))) => {
                log::debug!("engine answered {}", mv);
                Some(mv)
            }
            Ok(Ok(Some(BestMoveLine::NoMove))) => {
                log::info!("engine reports no move");
                None
            }
            Ok(Ok(None)) => {
                log::warn!("engine exited without a bestmove");
                None
            }
            Ok(Err(e)) => {
                log::warn!("engine {} failed: {}", self.path.display(), e);
                None
            }
            Err(_) => {
                log::warn!("engine timed out after {:?}", self.timeout);
                None
            }
        }
    }

    async fn exchange(&self, fen: &str, depth: u32) -> io::Result<Option<BestMoveLine>> {
        // Dropping the future on timeout drops the child, which kills it.
        let mut child = Command::new(&self.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "engine stdin unavailable"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "engine stdout unavailable"))?;

        for command in self.commands(fen, depth) {
            log::trace!("> {}", command);
            stdin.write_all(command.as_bytes()).await?;
            stdin.write_all(b"\n").await?;
        }
        stdin.flush().await?;

        let mut lines = BufReader::new(stdout).lines();
        let mut best = None;
        while let Some(line) = lines.next_line().await? {
            log::trace!("< {}", line);
            if let Some(reply) = parse_bestmove_line(&line) {
                best = Some(reply);
                break;
            }
        }

        // The engine may already be gone; nothing to do if these fail.
        let _ = stdin.write_all(b"quit\n").await;
        let _ = child.kill().await;
        Ok(best)
    }
}

impl SearchCollaborator for UciEngine {
    async fn best_move(&mut self, fen: &str, depth: u32) -> Option<String> {
        self.search(fen, depth).await
    }
}
