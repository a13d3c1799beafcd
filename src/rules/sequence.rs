//! Sequence detection.
//!
//! A sequence is a straight run of same-team chips along one of the four
//! axes, with wild corners counting for every team. Once detected a
//! sequence is never dropped; its tiles become protected from removal.
//!
//! ## Scan order
//!
//! Directions in `Direction::ALL` order, lines from the top-left, teams in
//! color order, windows from the start of each line. New sequence ids are
//! assigned in that order, which makes detection (and therefore replay)
//! deterministic.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::board::{Board, Direction, Position, TileId};
use crate::core::{EngineConfig, MergePolicy, TeamColor};

/// Sequence identifier, allocated in detection order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SequenceId(pub u32);

/// A detected run of chips.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: SequenceId,
    pub team: TeamColor,
    pub direction: Direction,
    /// Tiles in the run, ordered along the line.
    pub positions: SmallVec<[Position; 5]>,
}

impl Sequence {
    /// Build an unregistered sequence. `SequenceSet::push` assigns the id.
    #[must_use]
    pub fn new(team: TeamColor, direction: Direction, positions: &[Position]) -> Self {
        Self {
            id: SequenceId(0),
            team,
            direction,
            positions: SmallVec::from_slice(positions),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    /// Number of tiles shared with `positions`.
    #[must_use]
    pub fn overlap(&self, positions: &[Position]) -> usize {
        positions.iter().filter(|p| self.contains(**p)).count()
    }

    /// True if every one of `positions` is already part of this sequence.
    #[must_use]
    pub fn covers(&self, positions: &[Position]) -> bool {
        positions.iter().all(|p| self.contains(*p))
    }

    fn same_line(&self, team: TeamColor, direction: Direction) -> bool {
        self.team == team && self.direction == direction
    }
}

/// All detected sequences plus the protected tile index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSet {
    sequences: Vec<Sequence>,
    protected: FxHashSet<TileId>,
    next_id: u32,
}

impl SequenceSet {
    /// Register a sequence, assigning its id and protecting its tiles.
    pub fn push(&mut self, mut sequence: Sequence, board_size: usize) -> SequenceId {
        let id = SequenceId(self.next_id);
        self.next_id += 1;
        sequence.id = id;
        self.protected
            .extend(sequence.positions.iter().map(|p| p.tile_id(board_size)));
        self.sequences.push(sequence);
        id
    }

    /// Extend the sequence at `index` to cover `positions` as well.
    fn grow(&mut self, index: usize, positions: &[Position], board_size: usize) {
        let Some(sequence) = self.sequences.get_mut(index) else {
            return;
        };
        sequence.positions.extend_from_slice(positions);
        sequence.positions.sort_unstable();
        sequence.positions.dedup();
        self.protected
            .extend(positions.iter().map(|p| p.tile_id(board_size)));
    }

    #[must_use]
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.sequences.iter()
    }

    #[must_use]
    pub fn get(&self, id: SequenceId) -> Option<&Sequence> {
        self.sequences.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Tile ids inside any sequence.
    #[must_use]
    pub fn protected(&self) -> &FxHashSet<TileId> {
        &self.protected
    }

    #[must_use]
    pub fn is_protected(&self, tile: TileId) -> bool {
        self.protected.contains(&tile)
    }

    /// Number of sequences owned by `team`.
    #[must_use]
    pub fn count_for(&self, team: TeamColor) -> usize {
        self.sequences.iter().filter(|s| s.team == team).count()
    }

    pub fn clear(&mut self) {
        self.sequences.clear();
        self.protected.clear();
        self.next_id = 0;
    }
}

/// Outcome of one detection pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detection {
    /// Every sequence known after this pass, old and new.
    pub sequences: SequenceSet,
    /// Sequences first reported by this pass.
    pub completed: Vec<SequenceId>,
}

/// Scans a board for sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceDetector {
    length: usize,
    policy: MergePolicy,
}

impl Default for SequenceDetector {
    fn default() -> Self {
        Self::new(5, MergePolicy::default())
    }
}

impl SequenceDetector {
    #[must_use]
    pub fn new(length: usize, policy: MergePolicy) -> Self {
        Self {
            length: length.max(1),
            policy,
        }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.sequence_length, config.merge_policy)
    }

    /// Find every run on `board` not already accounted for in `previous`.
    #[must_use]
    pub fn detect(&self, board: &Board, previous: &SequenceSet) -> Detection {
        let size = board.size();
        let mut sequences = previous.clone();
        let mut completed = Vec::new();

        for direction in Direction::ALL {
            for line in lines(size, direction) {
                if line.len() < self.length {
                    continue;
                }
                for team in TeamColor::ALL {
                    for span in runs(board, &line, team, self.length) {
                        match self.policy {
                            MergePolicy::MergeOverlapping => {
                                merge_span(&mut sequences, &mut completed, team, direction, span, size)
                            }
                            MergePolicy::SharedTile => self.shared_windows(
                                &mut sequences,
                                &mut completed,
                                team,
                                direction,
                                span,
                                size,
                            ),
                        }
                    }
                }
            }
        }

        for id in &completed {
            if let Some(sequence) = sequences.get(*id) {
                debug!(
                    sequence = id.0,
                    team = %sequence.team,
                    direction = ?sequence.direction,
                    len = sequence.len(),
                    "sequence completed"
                );
            }
        }

        Detection {
            sequences,
            completed,
        }
    }

    /// Accept each window of `length` that shares at most one tile with
    /// every known sequence of the same team and direction.
    fn shared_windows(
        &self,
        sequences: &mut SequenceSet,
        completed: &mut Vec<SequenceId>,
        team: TeamColor,
        direction: Direction,
        span: &[Position],
        size: usize,
    ) {
        for window in span.windows(self.length) {
            let fits = sequences
                .iter()
                .filter(|s| s.same_line(team, direction))
                .all(|s| s.overlap(window) <= 1);
            if fits {
                completed.push(sequences.push(Sequence::new(team, direction, window), size));
            }
        }
    }
}

/// One maximal span is one sequence. Spans touching a single known
/// sequence grow it; spans bridging several leave them untouched so the
/// count never shrinks.
fn merge_span(
    sequences: &mut SequenceSet,
    completed: &mut Vec<SequenceId>,
    team: TeamColor,
    direction: Direction,
    span: &[Position],
    size: usize,
) {
    let touching: SmallVec<[usize; 2]> = sequences
        .iter()
        .enumerate()
        .filter(|(_, s)| s.same_line(team, direction) && s.overlap(span) > 0)
        .map(|(i, _)| i)
        .collect();

    match touching.as_slice() {
        [] => completed.push(sequences.push(Sequence::new(team, direction, span), size)),
        [index] => {
            if !sequences.sequences[*index].covers(span) {
                sequences.grow(*index, span, size);
            }
        }
        _ => {}
    }
}

/// Every full line of the board along `direction`, each ordered from its
/// start tile.
fn lines(size: usize, direction: Direction) -> Vec<Vec<Position>> {
    let mut lines = Vec::new();
    for row in 0..size {
        for col in 0..size {
            let start = Position::new(row, col);
            if start.offset(direction, -1, size).is_some() {
                continue;
            }
            let line: Vec<Position> = (0..size as isize)
                .map_while(|step| start.offset(direction, step, size))
                .collect();
            lines.push(line);
        }
    }
    lines
}

/// Maximal spans of `line` where every tile is a corner or holds a `team`
/// chip, at least `min_len` long and containing at least one real chip.
fn runs<'a>(board: &Board, line: &'a [Position], team: TeamColor, min_len: usize) -> Vec<&'a [Position]> {
    let counts = |pos: &Position| {
        board
            .tile(*pos)
            .is_some_and(|t| t.corner || t.chip_team() == Some(team))
    };
    let has_chip = |span: &[Position]| {
        span.iter()
            .any(|p| board.tile(*p).is_some_and(|t| t.chip_team() == Some(team)))
    };

    let mut spans = Vec::new();
    let mut start = None;
    for (i, pos) in line.iter().enumerate() {
        match (counts(pos), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                spans.push(&line[s..i]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push(&line[s..]);
    }

    spans
        .into_iter()
        .filter(|span| span.len() >= min_len && has_chip(span))
        .collect()
}
