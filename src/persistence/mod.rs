//! Save and resume.
//!
//! `Game::snapshot` captures a `GameStateSnapshot`; `Game::from_snapshot`
//! rebuilds an equal game. `SnapshotStore` keeps one snapshot on disk.
//! Failures come back as `PersistenceError` and never touch the live game.

pub mod snapshot;
pub mod store;

pub use snapshot::{GameStateSnapshot, SnapshotFormat, SNAPSHOT_VERSION};
pub use store::SnapshotStore;
