//! Card model: identity, wild-card roles, and the shoe.
//!
//! ## Key Types
//!
//! - `Card`: face + suit + physical id (equality ignores the id)
//! - `CardRole`: closed variant consumed by the move validator
//! - `Deck`: single or double shoe with seeded shuffle and dealing

pub mod card;
pub mod deck;

pub use card::{Card, CardId, CardRole, Face, Suit};
pub use deck::Deck;
