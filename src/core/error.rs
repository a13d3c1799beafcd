//! Error types.
//!
//! Illegal moves are not errors: the state machine ignores them and
//! returns no events. Only configuration and I/O failures surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by game commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cannot restart without players")]
    CannotRestartWithoutPlayers,
}

/// Errors from saving or loading a snapshot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("snapshot i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot binary: {0}")]
    Binary(#[from] bincode::Error),

    #[error("snapshot replace: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("no snapshot at {}", .0.display())]
    MissingSnapshot(PathBuf),

    #[error("snapshot version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}
