//! Position scoring for AI players.
//!
//! Every candidate move is scored by looking at each `length`-tile window
//! through the target tile, in all four directions:
//!
//! - Placement: windows free of opponent chips score by how many of our
//!   chips (corners count) they would hold, with a large bonus when the
//!   placement completes a window. Windows held by a single opponent score
//!   as blocks.
//! - Removal: windows through the target that are held only by the chip's
//!   owner score by how far along they are.
//!
//! Two-eyed wilds carry a small penalty so standard cards are preferred
//! when they do as well.

use crate::board::{Board, Direction, Position};
use crate::core::TeamColor;

/// Tunable weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeuristicWeights {
    pub completion: f64,
    pub build: f64,
    pub block: f64,
    pub removal: f64,
    pub wild_penalty: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            completion: 1_000.0,
            build: 1.0,
            block: 0.8,
            removal: 1.2,
            wild_penalty: 4.0,
        }
    }
}

/// Counts for one window through a target tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Window {
    own: usize,
    opponent: usize,
    /// Opponent team, if exactly one opponent team has chips in the window.
    opponent_team: Option<TeamColor>,
    mixed_opponents: bool,
}

/// Windows of `length` tiles that contain `pos`, skipping `pos` itself.
fn windows(board: &Board, pos: Position, team: TeamColor, length: usize) -> Vec<Window> {
    let size = board.size();
    let span = length as isize;
    let mut out = Vec::new();

    for direction in Direction::ALL {
        'start: for start in (1 - span)..=0 {
            let mut window = Window::default();
            for step in start..start + span {
                let Some(p) = pos.offset(direction, step, size) else {
                    continue 'start;
                };
                if p == pos {
                    continue;
                }
                let Some(tile) = board.tile(p) else {
                    continue 'start;
                };
                if tile.corner {
                    window.own += 1;
                    continue;
                }
                match tile.chip_team() {
                    Some(t) if t == team => window.own += 1,
                    Some(t) => {
                        window.opponent += 1;
                        match window.opponent_team {
                            None => window.opponent_team = Some(t),
                            Some(existing) if existing != t => window.mixed_opponents = true,
                            Some(_) => {}
                        }
                    }
                    None => {}
                }
            }
            out.push(window);
        }
    }
    out
}

/// Value of putting a `team` chip on `pos`.
#[must_use]
pub fn score_placement(
    board: &Board,
    pos: Position,
    team: TeamColor,
    length: usize,
    wild: bool,
    weights: &HeuristicWeights,
) -> f64 {
    let mut score = 0.0;
    let mut completes = false;

    for window in windows(board, pos, team, length) {
        if window.opponent == 0 {
            let filled = window.own + 1;
            if filled >= length {
                completes = true;
            }
            score += weights.build * (filled * filled) as f64;
        } else if window.own == 0 && !window.mixed_opponents {
            score += weights.block * (window.opponent * window.opponent) as f64;
        }
    }

    if completes {
        score += weights.completion;
    } else if wild {
        score -= weights.wild_penalty;
    }
    score
}

/// Value of removing the opponent chip at `pos` for `team`.
#[must_use]
pub fn score_removal(board: &Board, pos: Position, team: TeamColor, length: usize, weights: &HeuristicWeights) -> f64 {
    let Some(owner) = board.tile(pos).and_then(|t| t.chip_team()) else {
        return 0.0;
    };
    if owner == team {
        return 0.0;
    }

    // Score from the owner's point of view: windows it would have built on.
    windows(board, pos, owner, length)
        .into_iter()
        .filter(|w| w.opponent == 0)
        .map(|w| {
            let held = w.own + 1;
            weights.removal * (held * held) as f64
        })
        .sum()
}
