//! # sequence-engine
//!
//! Rules and state engine for Sequence, the team game where cards claim
//! tiles on a 10x10 board and five chips in a row make a sequence.
//!
//! ## Design Principles
//!
//! 1. **One mutable root**: `Game` owns the board, deck, players and move
//!    log. Validators, detectors and the AI get what they need as
//!    parameters and keep nothing.
//!
//! 2. **Deterministic**: every random choice goes through a seeded
//!    `GameRng`, and replays re-apply recorded moves without touching it.
//!
//! 3. **Events, not callbacks**: commands return the `GameEvent`s they
//!    caused. Illegal commands return nothing and change nothing.
//!
//! ## Modules
//!
//! - `core`: Players, teams, configuration, RNG, errors
//! - `cards`: Cards, faces, suits, the shoe
//! - `board`: Positions, tiles, chips, board seeding and chip mutation
//! - `rules`: Sequence detection and move legality
//! - `game`: The turn state machine
//! - `ai`: Computer players
//! - `replay`: Move log and timed playback
//! - `persistence`: Snapshots and atomic file storage

pub mod core;
pub mod cards;
pub mod board;
pub mod rules;
pub mod game;
pub mod ai;
pub mod replay;
pub mod persistence;

// Re-export commonly used types
pub use crate::core::{
    AiDifficulty, EngineConfig, GameError, GameRng, GameRngState, MergePolicy, PersistenceError, Player, PlayerId,
    SeatConfig, Team, TeamColor, WildCardRules,
};

pub use crate::cards::{Card, CardId, CardRole, Deck, Face, Suit};

pub use crate::board::{Board, BoardManager, Chip, Direction, Position, Tile, TileContent, TileId, BOARD_SIZE};

pub use crate::rules::{MoveValidator, Sequence, SequenceDetector, SequenceId, SequenceSet};

pub use crate::game::{Game, GameEvent, OverlayMode};

pub use crate::ai::{AiDecision, AiTurn};

pub use crate::replay::{GameMove, MoveKind, ReplayController, ReplayRecorder, ReplayStatus};

pub use crate::persistence::{GameStateSnapshot, SnapshotFormat, SnapshotStore};
