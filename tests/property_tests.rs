//! Property-based invariants.

use proptest::prelude::*;

use sequence_engine::board::{BoardManager, Position, BOARD_SIZE};
use sequence_engine::cards::Face;
use sequence_engine::core::{AiDifficulty, EngineConfig, GameRng, SeatConfig, TeamColor};
use sequence_engine::game::{Game, OverlayMode};
use sequence_engine::persistence::{GameStateSnapshot, SnapshotFormat};
use sequence_engine::rules::{SequenceDetector, SequenceSet};

fn ai_game(seed: u64, turns: usize) -> Game {
    let mut game = Game::new(EngineConfig::default().with_seed(seed));
    game.start_game(SeatConfig::into_players(vec![
        SeatConfig::ai("a", TeamColor::Blue, AiDifficulty::Easy),
        SeatConfig::ai("b", TeamColor::Green, AiDifficulty::Medium),
    ]));
    for _ in 0..turns {
        if game.overlay() == OverlayMode::PostPlacement {
            game.end_turn();
        }
        if game.overlay() != OverlayMode::TurnStart {
            break;
        }
        game.play_ai_turn();
    }
    game
}

fn position() -> impl Strategy<Value = Position> {
    (0..BOARD_SIZE + 2, 0..BOARD_SIZE + 2).prop_map(|(row, col)| Position::new(row, col))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Every seeded board has four empty corners and no excluded face.
    #[test]
    fn prop_seeded_board_layout(seed in any::<u64>()) {
        let board = BoardManager::setup_board(BOARD_SIZE, 2, Face::Jack, &mut GameRng::new(seed));

        prop_assert_eq!(board.tiles().iter().filter(|t| t.corner).count(), 4);
        for tile in board.tiles() {
            if tile.corner {
                prop_assert!(tile.card.is_none());
            } else {
                let card = tile.card;
                prop_assert!(card.is_some_and(|c| c.face != Face::Jack));
            }
        }
    }

    /// Corners never take a chip, whatever is asked.
    #[test]
    fn prop_corners_stay_empty(seed in any::<u64>(), targets in prop::collection::vec(position(), 1..40)) {
        let mut board = BoardManager::setup_board(BOARD_SIZE, 2, Face::Jack, &mut GameRng::new(seed));
        for (i, pos) in targets.into_iter().enumerate() {
            let team = TeamColor::ALL[i % 3];
            let placed = BoardManager::place_chip(&mut board, pos, team);
            if pos.is_corner(BOARD_SIZE) || !pos.in_bounds(BOARD_SIZE) {
                prop_assert!(!placed);
            }
        }
        for corner in Position::corners(BOARD_SIZE) {
            prop_assert!(board.tile(corner).is_some_and(|t| t.chip.is_none()));
        }
    }

    /// A play outside the legal set changes nothing.
    #[test]
    fn prop_illegal_play_is_inert(seed in 0u64..500, turns in 0usize..12, pos in position(), pick in any::<prop::sample::Index>()) {
        let mut game = ai_game(seed, turns);
        if game.overlay() == OverlayMode::PostPlacement {
            game.end_turn();
        }
        prop_assume!(game.overlay() == OverlayMode::TurnStart);
        let hand = game.current_player().map(|p| p.hand.clone()).unwrap_or_default();
        prop_assume!(!hand.is_empty());
        let card = hand[pick.index(hand.len())];
        game.select_card(card.id);
        prop_assume!(!game.valid_positions().contains(&pos));

        let before = game.snapshot();
        let events = game.perform_play(pos, card.id);

        prop_assert!(events.is_empty());
        prop_assert_eq!(game.snapshot(), before);
    }

    /// Protected tiles never lose their chip.
    #[test]
    fn prop_sequence_tiles_are_protected(seed in any::<u64>(), row in 1usize..9, start in 0usize..5) {
        let mut board = BoardManager::setup_board(BOARD_SIZE, 2, Face::Jack, &mut GameRng::new(seed));
        let run: Vec<Position> = (start..start + 5).map(|c| Position::new(row, c)).collect();
        for &pos in &run {
            BoardManager::place_chip(&mut board, pos, TeamColor::Red);
        }
        let detection = SequenceDetector::default().detect(&board, &SequenceSet::default());
        prop_assert_eq!(detection.completed.len(), 1);

        for &pos in &run {
            prop_assert!(!BoardManager::remove_chip(&mut board, pos, &detection.sequences));
        }
        prop_assert_eq!(board.chips().count(), 5);
    }

    /// Snapshots survive both encodings.
    #[test]
    fn prop_snapshot_round_trip(seed in 0u64..500, turns in 0usize..30) {
        let game = ai_game(seed, turns);
        let snapshot = game.snapshot();

        for format in [SnapshotFormat::Json, SnapshotFormat::Binary] {
            let bytes = snapshot.encode(format).unwrap();
            let decoded = GameStateSnapshot::decode(&bytes, format).unwrap();
            prop_assert_eq!(&decoded, &snapshot);
            prop_assert_eq!(Game::from_snapshot(decoded).snapshot(), snapshot.clone());
        }
    }
}
