//! AI move selection.
//!
//! The AI only ever chooses among the positions `MoveValidator` reports for
//! a card, so it has exactly the options a human would. Difficulty controls
//! how the scored candidates are turned into a pick:
//!
//! - `Easy`: uniform over every legal (card, position)
//! - `Medium`: weighted by heuristic score
//! - `Hard`: best score, ties broken at random

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::heuristic::{score_placement, score_removal, HeuristicWeights};
use crate::board::{Board, Position};
use crate::cards::{CardId, CardRole};
use crate::core::{AiDifficulty, GameRng, Player, WildCardRules};
use crate::rules::{MoveValidator, SequenceSet};

/// What the AI wants to do this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiDecision {
    Play { card_id: CardId, position: Position },
    /// No card in hand has a legal target; swap this one.
    ReplaceDeadCard { card_id: CardId },
}

/// One legal option with its heuristic value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredMove {
    pub card_id: CardId,
    pub position: Position,
    pub score: f64,
}

/// Chooses moves for AI players.
#[derive(Clone, Copy, Debug, Default)]
pub struct AiTurn {
    weights: HeuristicWeights,
}

impl AiTurn {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    /// Every legal (card, position) in `player`'s hand, scored.
    #[must_use]
    pub fn candidates(
        &self,
        player: &Player,
        board: &Board,
        sequences: &SequenceSet,
        rules: &WildCardRules,
        sequence_length: usize,
    ) -> Vec<ScoredMove> {
        let mut out = Vec::new();
        for card in &player.hand {
            let role = card.role(rules);
            for position in MoveValidator::legal_positions(card, player.team, board, sequences, rules) {
                let score = match role {
                    CardRole::RemoveOpponent => {
                        score_removal(board, position, player.team, sequence_length, &self.weights)
                    }
                    CardRole::PlaceAnywhere => {
                        score_placement(board, position, player.team, sequence_length, true, &self.weights)
                    }
                    CardRole::Standard => {
                        score_placement(board, position, player.team, sequence_length, false, &self.weights)
                    }
                };
                out.push(ScoredMove {
                    card_id: card.id,
                    position,
                    score,
                });
            }
        }
        out
    }

    /// Pick a move for `player`. `None` only when the hand is empty.
    pub fn decide(
        &self,
        player: &Player,
        board: &Board,
        sequences: &SequenceSet,
        rules: &WildCardRules,
        sequence_length: usize,
        rng: &mut GameRng,
    ) -> Option<AiDecision> {
        let first = player.hand.first()?;
        let candidates = self.candidates(player, board, sequences, rules, sequence_length);
        if candidates.is_empty() {
            debug!(player = %player.id, card = %first, "ai has only dead cards");
            return Some(AiDecision::ReplaceDeadCard { card_id: first.id });
        }

        let difficulty = player.difficulty.unwrap_or_default();
        let pick = match difficulty {
            AiDifficulty::Easy => rng.gen_range(0..candidates.len()),
            AiDifficulty::Medium => {
                let min = candidates.iter().map(|c| c.score).fold(f64::INFINITY, f64::min);
                let weights: Vec<f64> = candidates.iter().map(|c| c.score - min + 1.0).collect();
                rng.choose_weighted(&weights).unwrap_or(0)
            }
            AiDifficulty::Hard => {
                let best = candidates.iter().map(|c| c.score).fold(f64::NEG_INFINITY, f64::max);
                let top: Vec<usize> = (0..candidates.len()).filter(|&i| candidates[i].score >= best).collect();
                rng.choose(&top).copied().unwrap_or(0)
            }
        };

        let chosen = candidates[pick];
        debug!(
            player = %player.id,
            ?difficulty,
            card = %chosen.card_id,
            row = chosen.position.row,
            col = chosen.position.col,
            score = chosen.score,
            options = candidates.len(),
            "ai decision"
        );
        Some(AiDecision::Play {
            card_id: chosen.card_id,
            position: chosen.position,
        })
    }
}
