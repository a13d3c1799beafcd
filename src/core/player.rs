//! Players, teams and seats.
//!
//! ## PlayerId
//!
//! Type-safe player identifier, 0-based seat order.
//!
//! ## Teams
//!
//! Teams are identified by color only. The team set is derived from the
//! player list (`Team::from_players`); it is never stored independently.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

/// Player identifier supporting up to 255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Team chip color. "No team" is expressed as `Option<TeamColor>::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TeamColor {
    Blue,
    Green,
    Red,
}

impl TeamColor {
    pub const ALL: [TeamColor; 3] = [TeamColor::Blue, TeamColor::Green, TeamColor::Red];
}

impl std::fmt::Display for TeamColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TeamColor::Blue => "blue",
            TeamColor::Green => "green",
            TeamColor::Red => "red",
        };
        f.write_str(name)
    }
}

/// A team as seen from the current player list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub color: TeamColor,
    pub player_count: usize,
}

impl Team {
    /// Derive the teams present in `players`, in color order.
    #[must_use]
    pub fn from_players(players: &[Player]) -> Vec<Team> {
        TeamColor::ALL
            .iter()
            .filter_map(|&color| {
                let player_count = players.iter().filter(|p| p.team == color).count();
                (player_count > 0).then_some(Team {
                    color,
                    player_count,
                })
            })
            .collect()
    }
}

/// AI strength. Harder levels weight sequence-building moves more heavily.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team: TeamColor,
    pub hand: Vec<Card>,
    pub is_ai: bool,
    pub difficulty: Option<AiDifficulty>,
}

impl Player {
    /// A human-controlled player with an empty hand.
    pub fn human(id: PlayerId, name: impl Into<String>, team: TeamColor) -> Self {
        Self {
            id,
            name: name.into(),
            team,
            hand: Vec::new(),
            is_ai: false,
            difficulty: None,
        }
    }

    /// An AI-controlled player with an empty hand.
    pub fn ai(id: PlayerId, name: impl Into<String>, team: TeamColor, difficulty: AiDifficulty) -> Self {
        Self {
            is_ai: true,
            difficulty: Some(difficulty),
            ..Self::human(id, name, team)
        }
    }

    /// Find a card in hand by physical id.
    #[must_use]
    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == card_id)
    }

    /// Remove a card from hand by physical id.
    pub fn take_card(&mut self, card_id: CardId) -> Option<Card> {
        let index = self.hand.iter().position(|c| c.id == card_id)?;
        Some(self.hand.remove(index))
    }
}

/// Seat configuration used to build players at setup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub name: String,
    pub team: TeamColor,
    pub ai: Option<AiDifficulty>,
}

impl SeatConfig {
    pub fn human(name: impl Into<String>, team: TeamColor) -> Self {
        Self {
            name: name.into(),
            team,
            ai: None,
        }
    }

    pub fn ai(name: impl Into<String>, team: TeamColor, difficulty: AiDifficulty) -> Self {
        Self {
            name: name.into(),
            team,
            ai: Some(difficulty),
        }
    }

    /// Build players in seat order, assigning ids 0..n. Seats past the
    /// 256th have no id left and are dropped.
    #[must_use]
    pub fn into_players(seats: Vec<SeatConfig>) -> Vec<Player> {
        seats
            .into_iter()
            .zip(0..=u8::MAX)
            .map(|(seat, i)| {
                let id = PlayerId::new(i);
                match seat.ai {
                    Some(difficulty) => Player::ai(id, seat.name, seat.team, difficulty),
                    None => Player::human(id, seat.name, seat.team),
                }
            })
            .collect()
    }
}
