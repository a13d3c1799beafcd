//! Timed re-execution of a recorded move log.
//!
//! The controller never sleeps or spawns: the owner calls `tick` with the
//! current time and gets back at most one move index to apply. Stopping
//! clears the pending deadline, so a move that was scheduled but not yet
//! due is never applied.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::recorder::{GameMove, MoveKind};
use crate::board::{Board, BoardManager};
use crate::rules::{SequenceDetector, SequenceSet};

/// Replay lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplayStatus {
    #[default]
    Idle,
    Playing,
    Finished,
}

/// Drives a replay one move per interval.
#[derive(Clone, Debug)]
pub struct ReplayController {
    interval: Duration,
    index: usize,
    next_due: Option<Instant>,
    status: ReplayStatus,
}

impl ReplayController {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            index: 0,
            next_due: None,
            status: ReplayStatus::Idle,
        }
    }

    /// Begin at move 0; the first move is due immediately.
    pub fn start(&mut self, now: Instant) {
        self.index = 0;
        self.next_due = Some(now);
        self.status = ReplayStatus::Playing;
    }

    /// Halt and rewind to move 0. Board state is left as it is.
    pub fn stop(&mut self) {
        self.index = 0;
        self.next_due = None;
        self.status = ReplayStatus::Idle;
    }

    /// Index of the move to apply now, if one is due.
    ///
    /// Handing out the final index (or polling an empty log) moves the
    /// controller to `Finished`.
    pub fn tick(&mut self, now: Instant, total: usize) -> Option<usize> {
        if self.status != ReplayStatus::Playing {
            return None;
        }
        if self.index >= total {
            self.finish();
            return None;
        }
        match self.next_due {
            Some(due) if now >= due => {}
            _ => return None,
        }

        let index = self.index;
        self.index += 1;
        self.next_due = Some(now + self.interval);
        if self.index >= total {
            self.finish();
        }
        Some(index)
    }

    fn finish(&mut self) {
        self.next_due = None;
        self.status = ReplayStatus::Finished;
    }

    #[must_use]
    pub fn status(&self) -> ReplayStatus {
        self.status
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == ReplayStatus::Playing
    }

    /// Moves applied so far.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fraction of the log applied, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self, total: usize) -> f64 {
        if total == 0 {
            return if self.status == ReplayStatus::Finished { 1.0 } else { 0.0 };
        }
        (self.index.min(total) as f64) / total as f64
    }

    /// Re-execute one recorded move against `board`, then refresh
    /// `sequences`. Returns the number of sequences the move completed.
    pub fn apply_move(
        board: &mut Board,
        sequences: &mut SequenceSet,
        detector: &SequenceDetector,
        mv: &GameMove,
    ) -> usize {
        let applied = match (mv.kind, mv.position) {
            (MoveKind::Place, Some(pos)) => BoardManager::place_chip(board, pos, mv.team),
            (MoveKind::Remove, Some(pos)) => BoardManager::remove_chip(board, pos, sequences),
            _ => false,
        };
        if !applied {
            if mv.kind != MoveKind::DeadCardReplace {
                debug!(move_number = mv.move_number, kind = ?mv.kind, "replayed move had no effect");
            }
            return 0;
        }

        let detection = detector.detect(board, sequences);
        *sequences = detection.sequences;
        detection.completed.len()
    }

    /// Replay `moves` synchronously onto a chip-free copy of `board`.
    #[must_use]
    pub fn reconstruct<'a>(
        board: &Board,
        moves: impl IntoIterator<Item = &'a GameMove>,
        detector: &SequenceDetector,
    ) -> (Board, SequenceSet) {
        let mut board = board.clone();
        board.clear_chips();
        let mut sequences = SequenceSet::default();
        for mv in moves {
            Self::apply_move(&mut board, &mut sequences, detector, mv);
        }
        (board, sequences)
    }
}
