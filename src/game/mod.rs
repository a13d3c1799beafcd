//! Turn state machine.
//!
//! - `Game`: owns all mutable state and exposes the player commands
//! - `OverlayMode`: the current turn phase
//! - `GameEvent`: what a command did

pub mod event;
pub mod overlay;
pub mod state;

pub use event::GameEvent;
pub use overlay::OverlayMode;
pub use state::Game;
