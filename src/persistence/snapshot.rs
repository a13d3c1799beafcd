//! Serializable copy of a whole game.
//!
//! Two encodings: JSON for the on-disk document and bincode for compact
//! in-memory or network copies. Both round-trip to an equal snapshot.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Position};
use crate::cards::{Card, CardId, Deck};
use crate::core::{EngineConfig, GameRngState, PersistenceError, Player, TeamColor};
use crate::game::OverlayMode;
use crate::replay::GameMove;
use crate::rules::SequenceSet;

/// Bumped when the layout changes incompatibly.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to rebuild a `Game`.
///
/// Replay playback position is not included: a restored game always has
/// an idle replay controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub version: u32,
    pub config: EngineConfig,
    pub rng: GameRngState,
    pub board: Board,
    pub deck: Deck,
    pub discard: Vec<Card>,
    pub players: Vec<Player>,
    pub current_turn: usize,
    pub overlay: OverlayMode,
    /// Mode to return to when `overlay` is `Paused`.
    pub resume_mode: Option<OverlayMode>,
    pub selected_card: Option<CardId>,
    pub valid_positions: Vec<Position>,
    pub sequences: SequenceSet,
    pub winner: Option<TeamColor>,
    pub moves: Vector<GameMove>,
}

/// Snapshot encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotFormat {
    #[default]
    Json,
    Binary,
}

impl GameStateSnapshot {
    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        serde_json::from_str::<Self>(json)?.checked()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        bincode::deserialize::<Self>(bytes)?.checked()
    }

    /// Encode in `format`.
    pub fn encode(&self, format: SnapshotFormat) -> Result<Vec<u8>, PersistenceError> {
        match format {
            SnapshotFormat::Json => Ok(serde_json::to_vec_pretty(self)?),
            SnapshotFormat::Binary => self.to_bytes(),
        }
    }

    /// Decode bytes written by `encode` with the same `format`.
    pub fn decode(bytes: &[u8], format: SnapshotFormat) -> Result<Self, PersistenceError> {
        match format {
            SnapshotFormat::Json => serde_json::from_slice::<Self>(bytes)?.checked(),
            SnapshotFormat::Binary => Self::from_bytes(bytes),
        }
    }

    /// Reject snapshots written with a different layout version.
    fn checked(self) -> Result<Self, PersistenceError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineConfig, SeatConfig};
    use crate::game::Game;

    fn started_game() -> Game {
        let mut game = Game::new(EngineConfig::default().with_seed(17));
        game.start_game(SeatConfig::into_players(vec![
            SeatConfig::human("Ada", TeamColor::Blue),
            SeatConfig::human("Bo", TeamColor::Green),
        ]));
        game
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = started_game().snapshot();

        let json = snapshot.to_json().unwrap();
        let decoded = GameStateSnapshot::from_json(&json).unwrap();

        assert_eq!(decoded, snapshot);
        assert!(json.contains("\"current_turn\""));
    }

    #[test]
    fn test_binary_round_trip() {
        let snapshot = started_game().snapshot();

        let bytes = snapshot.encode(SnapshotFormat::Binary).unwrap();
        let decoded = GameStateSnapshot::decode(&bytes, SnapshotFormat::Binary).unwrap();

        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_other_version_is_rejected() {
        let mut snapshot = started_game().snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;

        for format in [SnapshotFormat::Json, SnapshotFormat::Binary] {
            let bytes = snapshot.encode(format).unwrap();
            assert!(matches!(
                GameStateSnapshot::decode(&bytes, format),
                Err(PersistenceError::UnsupportedVersion { found: 2, expected: 1 })
            ));
        }
        let json = snapshot.to_json().unwrap();
        assert!(GameStateSnapshot::from_json(&json).is_err());
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(matches!(
            GameStateSnapshot::decode(b"not json", SnapshotFormat::Json),
            Err(PersistenceError::Json(_))
        ));
        assert!(matches!(
            GameStateSnapshot::decode(&[1, 2, 3], SnapshotFormat::Binary),
            Err(PersistenceError::Binary(_))
        ));
    }
}
