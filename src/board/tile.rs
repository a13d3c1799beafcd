//! Tiles, chips and the board grid.
//!
//! A tile exclusively owns at most one chip, and a chip's position always
//! equals its tile's position. Corners never hold a card or a chip.

use serde::{Deserialize, Serialize};

use super::position::{Position, TileId};
use crate::cards::Card;
use crate::core::TeamColor;

/// Chip identifier, allocated in placement order per board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChipId(pub u32);

/// A team marker on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub id: ChipId,
    pub team: TeamColor,
    pub position: Position,
    pub placed: bool,
}

/// Borrowed view of what a tile holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileContent<'a> {
    /// Permanent wild corner.
    Wild,
    /// Non-corner tile that never received a card.
    Blank,
    /// Card with no chip on it.
    Open(&'a Card),
    /// Card covered by a chip.
    Occupied(&'a Card, &'a Chip),
}

/// One cell of the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub position: Position,
    pub card: Option<Card>,
    pub chip: Option<Chip>,
    pub corner: bool,
}

impl Tile {
    #[must_use]
    pub fn new(id: TileId, position: Position, corner: bool) -> Self {
        Self {
            id,
            position,
            card: None,
            chip: None,
            corner,
        }
    }

    /// No card printed here (corners, or tiles left blank by seeding).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.card.is_none()
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.chip.is_some()
    }

    #[must_use]
    pub fn content(&self) -> TileContent<'_> {
        if self.corner {
            return TileContent::Wild;
        }
        match (&self.card, &self.chip) {
            (Some(card), Some(chip)) => TileContent::Occupied(card, chip),
            (Some(card), None) => TileContent::Open(card),
            (None, _) => TileContent::Blank,
        }
    }

    /// Team whose chip sits here, if any.
    #[must_use]
    pub fn chip_team(&self) -> Option<TeamColor> {
        self.chip.map(|chip| chip.team)
    }
}

/// Square grid of tiles, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    tiles: Vec<Tile>,
    next_chip_id: u32,
}

impl Board {
    /// A board with no cards and no chips; corners flagged.
    #[must_use]
    pub fn empty(size: usize) -> Self {
        let tiles = (0..size)
            .flat_map(|row| (0..size).map(move |col| Position::new(row, col)))
            .map(|pos| Tile::new(pos.tile_id(size), pos, pos.is_corner(size)))
            .collect();
        Self {
            size,
            tiles,
            next_chip_id: 0,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.in_bounds(self.size)
    }

    #[must_use]
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.tiles.get(pos.row * self.size + pos.col)
    }

    pub fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.tiles.get_mut(pos.row * self.size + pos.col)
    }

    /// All tiles, row-major.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tiles grouped by row.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.size.max(1))
    }

    /// Tiles with a chip on them.
    pub fn chips(&self) -> impl Iterator<Item = &Chip> {
        self.tiles.iter().filter_map(|t| t.chip.as_ref())
    }

    /// Positions of non-corner tiles with a card and no chip.
    pub fn open_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.tiles
            .iter()
            .filter(|t| matches!(t.content(), TileContent::Open(_)))
            .map(|t| t.position)
    }

    /// Allocate the next chip id.
    pub fn alloc_chip_id(&mut self) -> ChipId {
        let id = ChipId(self.next_chip_id);
        self.next_chip_id += 1;
        id
    }

    /// Remove every chip and reset chip id allocation. Cards stay.
    pub fn clear_chips(&mut self) {
        for tile in &mut self.tiles {
            tile.chip = None;
        }
        self.next_chip_id = 0;
    }
}
