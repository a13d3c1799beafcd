//! Core engine types: players, teams, RNG, configuration, errors.
//!
//! These are shared by every other module and carry no rules logic.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{EngineConfig, MergePolicy, WildCardRules};
pub use error::{GameError, PersistenceError};
pub use player::{AiDifficulty, Player, PlayerId, SeatConfig, Team, TeamColor};
pub use rng::{GameRng, GameRngState};
