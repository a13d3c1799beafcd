//! Board construction and chip mutation.
//!
//! `BoardManager` is a pure mutator: it knows about corners, bounds and
//! sequence protection, but not about which card allows which move. Card
//! legality is the move validator's job.

use tracing::{debug, warn};

use super::position::Position;
use super::tile::{Board, Chip};
use crate::cards::{Deck, Face};
use crate::core::{GameRng, TeamColor};
use crate::rules::SequenceSet;

/// Builds boards and places/removes chips.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoardManager;

impl BoardManager {
    /// Seed a fresh `size` board from a shuffled shoe of `deck_count` decks.
    ///
    /// Corners stay wild. Every other tile, row-major, gets the next card
    /// whose face is not `excluded_face`. If the seeding shoe runs dry the
    /// remaining tiles stay blank.
    #[must_use]
    pub fn setup_board(size: usize, deck_count: usize, excluded_face: Face, rng: &mut GameRng) -> Board {
        let mut seeding = Deck::new(deck_count);
        seeding.shuffle(rng);

        let mut board = Board::empty(size);
        let mut blank = 0usize;
        for row in 0..size {
            for col in 0..size {
                let pos = Position::new(row, col);
                if pos.is_corner(size) {
                    continue;
                }
                let card = seeding.draw_excluding_face(excluded_face);
                if card.is_none() {
                    blank += 1;
                }
                if let Some(tile) = board.tile_mut(pos) {
                    tile.card = card;
                }
            }
        }

        if blank > 0 {
            warn!(blank, size, deck_count, "seeding deck exhausted, tiles left blank");
        }
        debug!(size, deck_count, leftover = seeding.remaining(), "board seeded");
        board
    }

    /// Put a `team` chip on `pos`.
    ///
    /// Returns false (and changes nothing) for out-of-bounds positions,
    /// corners, and tiles that already hold a chip.
    pub fn place_chip(board: &mut Board, pos: Position, team: TeamColor) -> bool {
        match board.tile(pos) {
            Some(tile) if !tile.corner && tile.chip.is_none() => {}
            _ => return false,
        }
        let id = board.alloc_chip_id();
        let Some(tile) = board.tile_mut(pos) else {
            return false;
        };
        tile.chip = Some(Chip {
            id,
            team,
            position: pos,
            placed: true,
        });
        true
    }

    /// Remove the chip on `pos`.
    ///
    /// Returns false for out-of-bounds positions, corners, empty tiles and
    /// chips that belong to any sequence in `sequences`.
    pub fn remove_chip(board: &mut Board, pos: Position, sequences: &SequenceSet) -> bool {
        let size = board.size();
        let Some(tile) = board.tile_mut(pos) else {
            return false;
        };
        if tile.corner || tile.chip.is_none() || sequences.is_protected(pos.tile_id(size)) {
            return false;
        }
        tile.chip = None;
        true
    }
}
