//! Move recording and replay.
//!
//! - `ReplayRecorder`: immutable, ordered log of executed moves
//! - `ReplayController`: re-executes the log one move per interval
//!
//! Replay never touches the RNG: chips are re-placed from the log onto the
//! same printed board, so the trajectory is identical to the live game.

pub mod controller;
pub mod recorder;

pub use controller::{ReplayController, ReplayStatus};
pub use recorder::{GameMove, MoveKind, ReplayRecorder};
