//! Board model: positions, tiles, chips, and the board manager.
//!
//! ## Key Types
//!
//! - `Position` / `Direction`: coordinates and the four scan axes
//! - `Tile` / `TileContent`: one cell and a tagged view of what it holds
//! - `Board`: the square grid (10×10 in standard play)
//! - `BoardManager`: seeding and chip placement/removal

pub mod manager;
pub mod position;
pub mod tile;

pub use manager::BoardManager;
pub use position::{Direction, Position, TileId, BOARD_SIZE};
pub use tile::{Board, Chip, ChipId, Tile, TileContent};
