//! Legal-position computation for a selected card.

use crate::board::{Board, Position, TileContent};
use crate::cards::{Card, CardRole};
use crate::core::{TeamColor, WildCardRules};

use super::sequence::SequenceSet;

/// Computes where a card may be played.
///
/// Stateless; everything it needs is passed in and nothing is retained.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveValidator;

impl MoveValidator {
    /// Legal target positions for `card` played by `team`, row-major.
    ///
    /// - Standard cards: open tiles printed with the same face and suit.
    /// - Two-eyed wilds: every open tile.
    /// - One-eyed wilds: tiles with an opponent chip outside any sequence.
    ///
    /// Corners are never legal. An empty result means the card is dead.
    #[must_use]
    pub fn legal_positions(
        card: &Card,
        team: TeamColor,
        board: &Board,
        sequences: &SequenceSet,
        rules: &WildCardRules,
    ) -> Vec<Position> {
        let size = board.size();
        let role = card.role(rules);
        board
            .tiles()
            .iter()
            .filter(|tile| match (role, tile.content()) {
                (CardRole::Standard, TileContent::Open(printed)) => printed.matches(card),
                (CardRole::PlaceAnywhere, TileContent::Open(_)) => true,
                (CardRole::RemoveOpponent, TileContent::Occupied(_, chip)) => {
                    chip.team != team && !sequences.is_protected(tile.position.tile_id(size))
                }
                _ => false,
            })
            .map(|tile| tile.position)
            .collect()
    }

    /// True if `pos` is a legal target for `card`.
    #[must_use]
    pub fn is_legal(
        card: &Card,
        team: TeamColor,
        pos: Position,
        board: &Board,
        sequences: &SequenceSet,
        rules: &WildCardRules,
    ) -> bool {
        Self::legal_positions(card, team, board, sequences, rules).contains(&pos)
    }

    /// A card with nowhere to go.
    #[must_use]
    pub fn is_dead(
        card: &Card,
        team: TeamColor,
        board: &Board,
        sequences: &SequenceSet,
        rules: &WildCardRules,
    ) -> bool {
        Self::legal_positions(card, team, board, sequences, rules).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardManager, Direction, BOARD_SIZE};
    use crate::cards::{CardId, Face, Suit};
    use crate::core::GameRng;
    use crate::rules::{Sequence, SequenceDetector};

    fn board() -> Board {
        BoardManager::setup_board(BOARD_SIZE, 2, Face::Jack, &mut GameRng::new(21))
    }

    fn printed_at(board: &Board, pos: Position) -> Card {
        board.tile(pos).and_then(|t| t.card).unwrap()
    }

    #[test]
    fn test_standard_card_matches_both_copies() {
        let board = board();
        let card = printed_at(&board, Position::new(2, 3));
        let rules = WildCardRules::default();

        let legal = MoveValidator::legal_positions(&card, TeamColor::Blue, &board, &SequenceSet::default(), &rules);

        assert_eq!(legal.len(), 2);
        assert!(legal.contains(&Position::new(2, 3)));
        for pos in legal {
            assert!(printed_at(&board, pos).matches(&card));
        }
    }

    #[test]
    fn test_standard_card_excludes_occupied() {
        let mut board = board();
        let pos = Position::new(2, 3);
        let card = printed_at(&board, pos);
        let rules = WildCardRules::default();
        BoardManager::place_chip(&mut board, pos, TeamColor::Green);

        let legal = MoveValidator::legal_positions(&card, TeamColor::Blue, &board, &SequenceSet::default(), &rules);
        assert_eq!(legal.len(), 1);
        assert!(!legal.contains(&pos));
    }

    #[test]
    fn test_dead_card() {
        let mut board = board();
        let card = printed_at(&board, Position::new(5, 5));
        let rules = WildCardRules::default();
        let matching: Vec<_> = board
            .tiles()
            .iter()
            .filter(|t| t.card.is_some_and(|c| c.matches(&card)))
            .map(|t| t.position)
            .collect();
        for pos in matching {
            BoardManager::place_chip(&mut board, pos, TeamColor::Red);
        }

        assert!(MoveValidator::is_dead(&card, TeamColor::Blue, &board, &SequenceSet::default(), &rules));
    }

    #[test]
    fn test_two_eyed_jack_any_open_tile() {
        let mut board = board();
        let rules = WildCardRules::default();
        let jack = Card::new(CardId::new(0), Face::Jack, Suit::Diamonds);
        BoardManager::place_chip(&mut board, Position::new(1, 1), TeamColor::Red);

        let legal = MoveValidator::legal_positions(&jack, TeamColor::Blue, &board, &SequenceSet::default(), &rules);
        assert_eq!(legal.len(), 95);
        assert!(!legal.contains(&Position::new(1, 1)));
        assert!(legal.iter().all(|p| !p.is_corner(BOARD_SIZE)));
    }

    #[test]
    fn test_one_eyed_jack_only_unprotected_opponents() {
        let mut board = board();
        let rules = WildCardRules::default();
        let jack = Card::new(CardId::new(0), Face::Jack, Suit::Spades);

        BoardManager::place_chip(&mut board, Position::new(8, 8), TeamColor::Blue);
        BoardManager::place_chip(&mut board, Position::new(8, 7), TeamColor::Red);
        let run: Vec<_> = (1..6).map(|c| Position::new(3, c)).collect();
        for &pos in &run {
            BoardManager::place_chip(&mut board, pos, TeamColor::Red);
        }
        let detection = SequenceDetector::default().detect(&board, &SequenceSet::default());

        let legal = MoveValidator::legal_positions(&jack, TeamColor::Blue, &board, &detection.sequences, &rules);
        assert_eq!(legal, vec![Position::new(8, 7)]);
    }

    #[test]
    fn test_one_eyed_jack_sees_protection_without_detection_pass() {
        let mut board = board();
        let rules = WildCardRules::default();
        let jack = Card::new(CardId::new(0), Face::Jack, Suit::Hearts);
        let run: Vec<_> = (0..5).map(|r| Position::new(r + 2, 6)).collect();
        for &pos in &run {
            BoardManager::place_chip(&mut board, pos, TeamColor::Green);
        }
        let mut sequences = SequenceSet::default();
        sequences.push(Sequence::new(TeamColor::Green, Direction::Vertical, &run), BOARD_SIZE);

        let legal = MoveValidator::legal_positions(&jack, TeamColor::Red, &board, &sequences, &rules);
        assert!(legal.is_empty());
    }
}
