//! Turn phases shown to the player.

use serde::{Deserialize, Serialize};

use crate::cards::CardRole;

/// Current phase of the turn state machine.
///
/// A play needs a selected card, so `perform_play` is only accepted in the
/// three selection modes.
///
/// ```text
/// TurnStart -> CardSelected | JackPlaceAnywhere | JackRemoveChip | DeadCard
/// CardSelected | Jack*      -> PostPlacement | GameOver
/// DeadCard                  -> TurnStart (same player)
/// PostPlacement             -> TurnStart (next player)
/// ```
///
/// `Paused` can be entered from any non-terminal mode. `ReplayFinished` is
/// only reached through replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlayMode {
    #[default]
    TurnStart,
    CardSelected,
    JackPlaceAnywhere,
    JackRemoveChip,
    DeadCard,
    PostPlacement,
    Paused,
    GameOver,
    ReplayFinished,
}

impl OverlayMode {
    /// Mode entered after selecting a card with at least one legal target.
    #[must_use]
    pub fn for_role(role: CardRole) -> Self {
        match role {
            CardRole::Standard => OverlayMode::CardSelected,
            CardRole::PlaceAnywhere => OverlayMode::JackPlaceAnywhere,
            CardRole::RemoveOpponent => OverlayMode::JackRemoveChip,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, OverlayMode::GameOver | OverlayMode::ReplayFinished)
    }

    /// Modes in which the current player may pick (or re-pick) a card.
    #[must_use]
    pub fn accepts_selection(self) -> bool {
        matches!(
            self,
            OverlayMode::TurnStart
                | OverlayMode::CardSelected
                | OverlayMode::JackPlaceAnywhere
                | OverlayMode::JackRemoveChip
                | OverlayMode::DeadCard
        )
    }

    /// Modes in which a play may be performed.
    #[must_use]
    pub fn accepts_play(self) -> bool {
        matches!(
            self,
            OverlayMode::CardSelected
                | OverlayMode::JackPlaceAnywhere
                | OverlayMode::JackRemoveChip
        )
    }
}
