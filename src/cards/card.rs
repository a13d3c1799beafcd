//! Card identity: face, suit and per-physical-card id.
//!
//! Two physical cards with the same face and suit are interchangeable for
//! matching purposes, so `Card` equality and hashing ignore the id. The id
//! only distinguishes the two copies in a double-deck shoe (a player holding
//! both copies selects one by id).

use serde::{Deserialize, Serialize};

use crate::core::config::WildCardRules;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All four suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

/// Card face (rank).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Face {
    /// All thirteen faces in deck order.
    pub const ALL: [Face; 13] = [
        Face::Two,
        Face::Three,
        Face::Four,
        Face::Five,
        Face::Six,
        Face::Seven,
        Face::Eight,
        Face::Nine,
        Face::Ten,
        Face::Jack,
        Face::Queen,
        Face::King,
        Face::Ace,
    ];

    fn label(self) -> &'static str {
        match self {
            Face::Two => "2",
            Face::Three => "3",
            Face::Four => "4",
            Face::Five => "5",
            Face::Six => "6",
            Face::Seven => "7",
            Face::Eight => "8",
            Face::Nine => "9",
            Face::Ten => "10",
            Face::Jack => "J",
            Face::Queen => "Q",
            Face::King => "K",
            Face::Ace => "A",
        }
    }
}

/// Identifier of one physical card in a shoe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// How a card may be used on the board.
///
/// The move validator consumes this instead of inspecting faces directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardRole {
    /// Place a chip on an open tile showing the same face and suit.
    Standard,
    /// Two-eyed wild: place a chip on any open tile.
    PlaceAnywhere,
    /// One-eyed wild: remove an unprotected opponent chip.
    RemoveOpponent,
}

/// A playing card.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub face: Face,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(id: CardId, face: Face, suit: Suit) -> Self {
        Self { id, face, suit }
    }

    /// Classify this card under the given wild-card rules.
    #[must_use]
    pub fn role(&self, rules: &WildCardRules) -> CardRole {
        if self.face != rules.face {
            CardRole::Standard
        } else if rules.two_eyed_suits.contains(&self.suit) {
            CardRole::PlaceAnywhere
        } else {
            CardRole::RemoveOpponent
        }
    }

    /// Same face and suit, regardless of which physical copy.
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.face == other.face && self.suit == other.suit
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl Eq for Card {}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.face.hash(state);
        self.suit.hash(state);
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.face.label(), self.suit.symbol())
    }
}
