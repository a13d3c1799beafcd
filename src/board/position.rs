//! Board coordinates and scan directions.

use serde::{Deserialize, Serialize};

/// Side length of the standard board.
pub const BOARD_SIZE: usize = 10;

/// Tile identifier: row-major index into the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u16);

impl TileId {
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// A (row, column) cell on a square board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// True iff this is one of the four wild corners of a `size` board.
    #[must_use]
    pub const fn is_corner(self, size: usize) -> bool {
        if size == 0 {
            return false;
        }
        let max = size - 1;
        (self.row == 0 || self.row == max) && (self.col == 0 || self.col == max)
    }

    /// Step `steps` tiles along `direction` (negative steps walk backwards).
    ///
    /// Returns `None` when the result falls off the board.
    #[must_use]
    pub fn offset(self, direction: Direction, steps: isize, size: usize) -> Option<Position> {
        let (dr, dc) = direction.delta();
        let row = self.row as isize + dr * steps;
        let col = self.col as isize + dc * steps;
        if row < 0 || col < 0 {
            return None;
        }
        let pos = Position::new(row as usize, col as usize);
        pos.in_bounds(size).then_some(pos)
    }

    #[must_use]
    pub fn tile_id(self, size: usize) -> TileId {
        TileId((self.row * size + self.col) as u16)
    }

    /// The four corner positions of a `size` board.
    #[must_use]
    pub fn corners(size: usize) -> [Position; 4] {
        let max = size.saturating_sub(1);
        [
            Position::new(0, 0),
            Position::new(0, max),
            Position::new(max, 0),
            Position::new(max, max),
        ]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four axes a sequence can run along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// (row, col) delta of one step.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        let corners: Vec<_> = (0..BOARD_SIZE)
            .flat_map(|r| (0..BOARD_SIZE).map(move |c| Position::new(r, c)))
            .filter(|p| p.is_corner(BOARD_SIZE))
            .collect();

        assert_eq!(corners.len(), 4);
        for corner in Position::corners(BOARD_SIZE) {
            assert!(corners.contains(&corner));
        }
        assert!(!Position::new(0, 5).is_corner(BOARD_SIZE));
    }

    #[test]
    fn test_offset_stays_on_board() {
        let origin = Position::new(0, 0);
        assert_eq!(
            origin.offset(Direction::Diagonal, 3, BOARD_SIZE),
            Some(Position::new(3, 3))
        );
        assert_eq!(origin.offset(Direction::Horizontal, -1, BOARD_SIZE), None);
        assert_eq!(origin.offset(Direction::AntiDiagonal, 1, BOARD_SIZE), None);
        assert_eq!(
            Position::new(0, 9).offset(Direction::AntiDiagonal, 2, BOARD_SIZE),
            Some(Position::new(2, 7))
        );
        assert_eq!(Position::new(9, 9).offset(Direction::Vertical, 1, BOARD_SIZE), None);
    }

    #[test]
    fn test_tile_id_row_major() {
        assert_eq!(Position::new(0, 0).tile_id(BOARD_SIZE), TileId(0));
        assert_eq!(Position::new(2, 3).tile_id(BOARD_SIZE), TileId(23));
        assert_eq!(Position::new(9, 9).tile_id(BOARD_SIZE), TileId(99));
    }
}
