//! Card shoe: one or more full 52-card decks.
//!
//! The top of the deck is the end of the vec.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, Face, Suit};
use crate::core::player::Player;
use crate::core::GameRng;

/// A shoe of `deck_count` standard 52-card decks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    deck_count: usize,
    cards: Vec<Card>,
    /// Cards drawn since the last reset (including discarded seeding draws).
    draw_count: usize,
}

impl Deck {
    /// Create a populated, unshuffled shoe.
    #[must_use]
    pub fn new(deck_count: usize) -> Self {
        let mut deck = Self {
            deck_count,
            cards: Vec::with_capacity(deck_count * 52),
            draw_count: 0,
        };
        deck.reset();
        deck
    }

    /// Two decks, 104 cards.
    #[must_use]
    pub fn double() -> Self {
        Self::new(2)
    }

    /// Repopulate with every (face, suit) once per deck. Ids are unique
    /// across the shoe.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.draw_count = 0;
        let mut id = 0;
        for _ in 0..self.deck_count {
            for suit in Suit::ALL {
                for face in Face::ALL {
                    self.cards.push(Card::new(CardId::new(id), face, suit));
                    id += 1;
                }
            }
        }
    }

    /// Uniformly permute the remaining cards.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Draw the top card, or `None` when the shoe is empty.
    pub fn draw(&mut self) -> Option<Card> {
        let card = self.cards.pop()?;
        self.draw_count += 1;
        Some(card)
    }

    /// Draw until a card whose face is not `face` turns up, permanently
    /// discarding every matching card along the way.
    ///
    /// Board seeding only: this destroys cards and must never be called on
    /// the live gameplay deck.
    pub fn draw_excluding_face(&mut self, face: Face) -> Option<Card> {
        while let Some(card) = self.draw() {
            if card.face != face {
                return Some(card);
            }
        }
        None
    }

    /// Deal `count` cards to each player, round-robin, appending to hands.
    ///
    /// Stops early if the shoe runs out.
    pub fn deal(&mut self, count: usize, players: &mut [Player]) {
        if count == 0 || players.is_empty() {
            return;
        }
        for _ in 0..count {
            for player in players.iter_mut() {
                match self.draw() {
                    Some(card) => player.hand.push(card),
                    None => return,
                }
            }
        }
    }

    /// Number of cards left to draw.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards drawn since the last reset.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    /// Remaining cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::{PlayerId, TeamColor};

    #[test]
    fn test_single_deck_unique() {
        let deck = Deck::new(1);
        assert_eq!(deck.remaining(), 52);

        let unique: std::collections::HashSet<_> = deck.cards().iter().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_double_deck_has_two_of_each() {
        let deck = Deck::double();
        assert_eq!(deck.remaining(), 104);

        let queens_of_hearts = deck
            .cards()
            .iter()
            .filter(|c| c.face == Face::Queen && c.suit == Suit::Hearts)
            .count();
        assert_eq!(queens_of_hearts, 2);

        let ids: std::collections::HashSet<_> = deck.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 104);
    }

    #[test]
    fn test_draw_until_empty() {
        let mut deck = Deck::new(1);
        for _ in 0..52 {
            assert!(deck.draw().is_some());
        }
        assert!(deck.draw().is_none());
        assert_eq!(deck.draw_count(), 52);
    }

    #[test]
    fn test_draw_excluding_face_discards_matches() {
        let mut deck = Deck::new(1);
        let mut drawn = Vec::new();
        while let Some(card) = deck.draw_excluding_face(Face::Jack) {
            drawn.push(card);
        }

        assert_eq!(drawn.len(), 48);
        assert!(drawn.iter().all(|c| c.face != Face::Jack));
        assert_eq!(deck.draw_count(), 52);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let mut a = Deck::double();
        let mut b = Deck::double();
        a.shuffle(&mut GameRng::new(9));
        b.shuffle(&mut GameRng::new(9));

        let ids_a: Vec<_> = a.cards().iter().map(|c| c.id).collect();
        let ids_b: Vec<_> = b.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_deal_round_robin() {
        let mut deck = Deck::new(1);
        let mut players = vec![
            Player::human(PlayerId::new(0), "Ann", TeamColor::Blue),
            Player::human(PlayerId::new(1), "Bo", TeamColor::Green),
        ];

        let top = deck.cards()[51];
        let second = deck.cards()[50];
        deck.deal(3, &mut players);

        assert_eq!(players[0].hand.len(), 3);
        assert_eq!(players[1].hand.len(), 3);
        assert_eq!(players[0].hand[0].id, top.id);
        assert_eq!(players[1].hand[0].id, second.id);
        assert_eq!(deck.remaining(), 46);
    }

    #[test]
    fn test_deal_noops() {
        let mut deck = Deck::new(1);
        let mut players = vec![Player::human(PlayerId::new(0), "Ann", TeamColor::Blue)];

        deck.deal(0, &mut players);
        deck.deal(5, &mut []);

        assert!(players[0].hand.is_empty());
        assert_eq!(deck.remaining(), 52);
    }
}
