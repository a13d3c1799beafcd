//! Events returned by game commands.
//!
//! Commands return the events they caused instead of calling out to
//! listeners. Presentation code (sound, animation, logs) consumes them.
//! An illegal or ignored command returns an empty list.

use serde::{Deserialize, Serialize};

use super::overlay::OverlayMode;
use crate::board::Position;
use crate::cards::Card;
use crate::core::{PlayerId, TeamColor};
use crate::rules::SequenceId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted {
        players: usize,
        hand_size: usize,
    },
    CardSelected {
        player: PlayerId,
        card: Card,
        legal_positions: usize,
    },
    ChipPlaced {
        player: PlayerId,
        team: TeamColor,
        position: Position,
    },
    ChipRemoved {
        player: PlayerId,
        /// Owner of the removed chip.
        team: TeamColor,
        position: Position,
    },
    SequenceCompleted {
        team: TeamColor,
        sequence: SequenceId,
    },
    CardDrawn {
        player: PlayerId,
    },
    /// A draw was attempted on an empty deck.
    DeckExhausted {
        player: PlayerId,
    },
    DeadCardReplaced {
        player: PlayerId,
        card: Card,
    },
    TurnAdvanced {
        player: PlayerId,
    },
    OverlayChanged {
        from: OverlayMode,
        to: OverlayMode,
    },
    /// `winner` is `None` when every hand ran out before anyone won.
    GameOver {
        winner: Option<TeamColor>,
    },
    ReplayStarted {
        moves: usize,
    },
    ReplayStep {
        index: usize,
        move_number: u32,
        sequences_completed: usize,
    },
    ReplayFinished,
}
