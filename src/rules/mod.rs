//! Game rules: move legality and sequence detection.
//!
//! Both components are stateless with respect to the game: they receive the
//! board and the known sequences as parameters and never retain them.

pub mod sequence;
pub mod validator;

pub use sequence::{Detection, Sequence, SequenceDetector, SequenceId, SequenceSet};
pub use validator::MoveValidator;
