//! Computer players.
//!
//! - `heuristic`: scores a single candidate placement or removal
//! - `turn`: enumerates legal candidates and picks one by difficulty

pub mod heuristic;
pub mod turn;

pub use heuristic::HeuristicWeights;
pub use turn::{AiDecision, AiTurn, ScoredMove};
