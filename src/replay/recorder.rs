//! Append-only log of executed moves.

use std::time::{SystemTime, UNIX_EPOCH};

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::cards::Card;
use crate::core::{Player, PlayerId, TeamColor};

/// What a recorded move did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Place,
    Remove,
    /// Dead card swapped for a fresh one; no board effect.
    DeadCardReplace,
}

/// One executed move. Never mutated after it is recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMove {
    /// 1-based, strictly increasing within a game.
    pub move_number: u32,
    /// Target tile; `None` for dead-card replacements.
    pub position: Option<Position>,
    pub card: Card,
    pub player_id: PlayerId,
    pub player_name: String,
    pub team: TeamColor,
    pub kind: MoveKind,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    pub sequences_completed: usize,
}

/// Records moves in execution order.
///
/// Backed by `im::Vector` so snapshots of the log are O(1) clones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayRecorder {
    moves: Vector<GameMove>,
}

impl ReplayRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a recorder from a saved log.
    #[must_use]
    pub fn from_moves(moves: Vector<GameMove>) -> Self {
        Self { moves }
    }

    /// Append a move and return its number.
    pub fn record_move(
        &mut self,
        position: Option<Position>,
        card: Card,
        player: &Player,
        kind: MoveKind,
        sequences_completed: usize,
    ) -> u32 {
        let move_number = self.moves.last().map_or(1, |m| m.move_number + 1);
        self.moves.push_back(GameMove {
            move_number,
            position,
            card,
            player_id: player.id,
            player_name: player.name.clone(),
            team: player.team,
            kind,
            timestamp_ms: now_ms(),
            sequences_completed,
        });
        move_number
    }

    pub fn clear_moves(&mut self) {
        self.moves.clear();
    }

    #[must_use]
    pub fn moves(&self) -> &Vector<GameMove> {
        &self.moves
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GameMove> {
        self.moves.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Face, Suit};

    fn player() -> Player {
        Player::human(PlayerId::new(2), "Cy", TeamColor::Green)
    }

    #[test]
    fn test_move_numbers_increase() {
        let mut recorder = ReplayRecorder::new();
        let card = Card::new(CardId::new(4), Face::Six, Suit::Clubs);

        let first = recorder.record_move(Some(Position::new(1, 2)), card, &player(), MoveKind::Place, 0);
        let second = recorder.record_move(None, card, &player(), MoveKind::DeadCardReplace, 0);

        assert_eq!((first, second), (1, 2));
        let recorded = recorder.get(0).unwrap();
        assert_eq!(recorded.player_id, PlayerId::new(2));
        assert_eq!(recorded.player_name, "Cy");
        assert_eq!(recorded.team, TeamColor::Green);
        assert_eq!(recorded.position, Some(Position::new(1, 2)));
        assert!(recorded.timestamp_ms > 0);
    }

    #[test]
    fn test_clear_restarts_numbering() {
        let mut recorder = ReplayRecorder::new();
        let card = Card::new(CardId::new(4), Face::Six, Suit::Clubs);
        recorder.record_move(Some(Position::new(1, 2)), card, &player(), MoveKind::Place, 0);

        recorder.clear_moves();
        assert!(recorder.is_empty());
        assert_eq!(recorder.record_move(None, card, &player(), MoveKind::DeadCardReplace, 0), 1);
    }
}
