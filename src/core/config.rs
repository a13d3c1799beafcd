//! Engine configuration.
//!
//! Everything that varies between rule sets lives here: the seed, hand
//! sizes, the win threshold, how overlapping runs are counted and which
//! cards are wild. The configuration is stored inside snapshots so a
//! restored game keeps its rules.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::{Face, Suit};

/// How runs longer than the sequence length, or runs that overlap an
/// existing sequence in the same line, are counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergePolicy {
    /// A contiguous same-team span is a single sequence however long it
    /// gets. An existing sequence grows instead of a new one being reported.
    #[default]
    MergeOverlapping,
    /// A new sequence may share at most one tile with an existing sequence
    /// in the same line (so nine in a row counts as two).
    SharedTile,
}

/// Which cards are wild and what they do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WildCardRules {
    /// Wild face. Never printed on the board.
    pub face: Face,
    /// Suits of the wild face that place anywhere; the rest remove chips.
    pub two_eyed_suits: Vec<Suit>,
}

impl Default for WildCardRules {
    fn default() -> Self {
        Self {
            face: Face::Jack,
            two_eyed_suits: vec![Suit::Diamonds, Suit::Clubs],
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for board layout, deck shuffle and AI choices.
    pub seed: u64,

    /// Number of 52-card decks in the shoe and on the board.
    pub deck_count: usize,

    /// Cards dealt per player. `None` uses the standard table. At least 1.
    pub hand_size: Option<usize>,

    /// Sequences a team needs to win. At least 1.
    pub sequences_to_win: usize,

    /// Chips in a line needed for a sequence.
    pub sequence_length: usize,

    pub merge_policy: MergePolicy,

    pub wild_cards: WildCardRules,

    /// Delay between moves during replay.
    pub replay_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            deck_count: 2,
            hand_size: None,
            sequences_to_win: 2,
            sequence_length: 5,
            merge_policy: MergePolicy::default(),
            wild_cards: WildCardRules::default(),
            replay_interval: Duration::from_secs(1),
        }
    }
}

impl EngineConfig {
    /// Standard rules for the given number of teams: three teams need one
    /// sequence, otherwise two.
    #[must_use]
    pub fn for_team_count(team_count: usize) -> Self {
        let sequences_to_win = if team_count >= 3 { 1 } else { 2 };
        Self {
            sequences_to_win,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = Some(size.max(1));
        self
    }

    #[must_use]
    pub fn with_sequences_to_win(mut self, count: usize) -> Self {
        self.sequences_to_win = count.max(1);
        self
    }

    #[must_use]
    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    #[must_use]
    pub fn with_wild_cards(mut self, rules: WildCardRules) -> Self {
        self.wild_cards = rules;
        self
    }

    #[must_use]
    pub fn with_replay_interval(mut self, interval: Duration) -> Self {
        self.replay_interval = interval;
        self
    }

    /// Raise a zero hand size or win threshold to 1. Fields are public, so
    /// `Game::new` applies this to whatever it is given.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.sequences_to_win = self.sequences_to_win.max(1);
        self.hand_size = self.hand_size.map(|size| size.max(1));
        self
    }

    /// Cards dealt to each player for a table of `player_count`.
    #[must_use]
    pub fn hand_size_for(&self, player_count: usize) -> usize {
        if let Some(size) = self.hand_size {
            return size;
        }
        match player_count {
            0..=2 => 7,
            3..=4 => 6,
            5..=6 => 5,
            7..=9 => 4,
            _ => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.deck_count, 2);
        assert_eq!(config.sequences_to_win, 2);
        assert_eq!(config.sequence_length, 5);
        assert_eq!(config.merge_policy, MergePolicy::MergeOverlapping);
        assert_eq!(config.wild_cards.face, Face::Jack);
    }

    #[test]
    fn test_standard_hand_sizes() {
        let config = EngineConfig::default();
        assert_eq!(config.hand_size_for(2), 7);
        assert_eq!(config.hand_size_for(4), 6);
        assert_eq!(config.hand_size_for(6), 5);
        assert_eq!(config.hand_size_for(8), 4);
        assert_eq!(config.hand_size_for(12), 3);

        let fixed = EngineConfig::default().with_hand_size(5);
        assert_eq!(fixed.hand_size_for(2), 5);
    }

    #[test]
    fn test_three_teams_need_one_sequence() {
        assert_eq!(EngineConfig::for_team_count(2).sequences_to_win, 2);
        assert_eq!(EngineConfig::for_team_count(3).sequences_to_win, 1);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_seed(7)
            .with_sequences_to_win(3)
            .with_merge_policy(MergePolicy::SharedTile)
            .with_replay_interval(Duration::from_millis(250));

        assert_eq!(config.seed, 7);
        assert_eq!(config.sequences_to_win, 3);
        assert_eq!(config.merge_policy, MergePolicy::SharedTile);
        assert_eq!(config.replay_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_zero_thresholds_are_raised() {
        let built = EngineConfig::default().with_sequences_to_win(0).with_hand_size(0);
        assert_eq!(built.sequences_to_win, 1);
        assert_eq!(built.hand_size_for(2), 1);

        let raw = EngineConfig {
            sequences_to_win: 0,
            hand_size: Some(0),
            ..EngineConfig::default()
        };
        let normalized = raw.normalized();
        assert_eq!(normalized.sequences_to_win, 1);
        assert_eq!(normalized.hand_size, Some(1));
        assert_eq!(EngineConfig::default().normalized(), EngineConfig::default());
    }

    #[test]
    fn test_config_serde() {
        let config = EngineConfig::default().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
