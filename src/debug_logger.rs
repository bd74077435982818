// Debug logging module for asynchronous decision logging
//
// Fire-and-forget: writes happen on a spawned tokio task so the judge's
// request is never held up. Each served decision becomes one JSONL line.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::types::{GameState, MoveCommand};

/// Represents a single debug log entry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DebugLogEntry {
    pub turn: i64,
    pub player_number: i64,
    pub boosts_remaining: i64,
    pub chosen_move: MoveCommand,
    pub state: GameState,
    pub timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    /// Must be called from within a tokio runtime.
    pub fn log_move(
        &self,
        state: GameState,
        player_number: i64,
        boosts_remaining: i64,
        chosen_move: MoveCommand,
    ) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();
        let entry = DebugLogEntry {
            turn: state.turn_count,
            player_number,
            boosts_remaining,
            chosen_move,
            state,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        tokio::spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }

    /// Appends one entry and flushes. Awaitable counterpart of `log_move`.
    pub async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }

    /// Handle to the underlying file, for callers that need to await a write
    pub fn handle(&self) -> Arc<Mutex<Option<File>>> {
        self.file.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Board, Coord, Direction};

    fn temp_log_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("tron_debug_{}_{}.jsonl", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_disabled_logger_is_noop() {
        let logger = DebugLogger::new(false, "unused.jsonl").await;
        assert!(!logger.is_enabled());
        logger.log_move(GameState::default(), 1, 0, MoveCommand::new(Direction::Up));
    }

    #[tokio::test]
    async fn test_written_entry_round_trips() {
        let path = temp_log_path("roundtrip");
        let logger = DebugLogger::new(true, path.to_str().unwrap()).await;
        assert!(logger.is_enabled());

        let state = GameState {
            board: Board::empty(3, 3),
            agent1_trail: vec![Coord::new(1, 1)],
            turn_count: 5,
            ..GameState::default()
        };
        let entry = DebugLogEntry {
            turn: 5,
            player_number: 1,
            boosts_remaining: 3,
            chosen_move: MoveCommand::new(Direction::Down),
            state,
            timestamp: "2025-01-01T00:00:00+00:00".to_string(),
        };
        DebugLogger::write_entry(logger.handle(), entry.clone()).await;

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: DebugLogEntry = serde_json::from_str(contents.trim()).unwrap();
        assert_eq!(parsed, entry);
        assert!(contents.contains("\"chosen_move\":\"DOWN\""));

        let _ = std::fs::remove_file(&path);
    }
}
