//! Replay recorder and controller integration tests.

use std::time::{Duration, Instant};

use sequence_engine::core::{AiDifficulty, EngineConfig, SeatConfig, TeamColor};
use sequence_engine::game::{Game, GameEvent, OverlayMode};
use sequence_engine::replay::{ReplayController, ReplayStatus};

const INTERVAL: Duration = Duration::from_millis(250);

fn ai_game(seed: u64) -> Game {
    let mut game = Game::new(EngineConfig::default().with_seed(seed).with_replay_interval(INTERVAL));
    game.start_game(SeatConfig::into_players(vec![
        SeatConfig::ai("north", TeamColor::Blue, AiDifficulty::Hard),
        SeatConfig::ai("east", TeamColor::Red, AiDifficulty::Medium),
        SeatConfig::ai("south", TeamColor::Blue, AiDifficulty::Easy),
        SeatConfig::ai("west", TeamColor::Red, AiDifficulty::Hard),
    ]));
    game
}

/// Play up to `turns` AI turns, stopping early at game over.
fn play(game: &mut Game, turns: usize) {
    for _ in 0..turns {
        if game.overlay() == OverlayMode::PostPlacement {
            game.end_turn();
        }
        if game.overlay() != OverlayMode::TurnStart {
            return;
        }
        game.play_ai_turn();
    }
}

fn play_to_end(game: &mut Game) {
    play(game, 1_000);
    assert_eq!(game.overlay(), OverlayMode::GameOver);
}

// =============================================================================
// Replay reproduces the live game
// =============================================================================

#[test]
fn test_reconstruct_matches_live_game() {
    for seed in [1, 2, 3] {
        let mut game = ai_game(seed);
        play_to_end(&mut game);

        let (board, sequences) = ReplayController::reconstruct(game.board(), game.moves(), game.detector());

        assert_eq!(&board, game.board(), "seed {seed}");
        assert_eq!(&sequences, game.sequences(), "seed {seed}");
    }
}

#[test]
fn test_timed_replay_matches_live_game() {
    let mut game = ai_game(4);
    play_to_end(&mut game);
    let final_board = game.board().clone();
    let final_sequences = game.sequences().clone();
    let total = game.moves().len();

    let start = Instant::now();
    assert_eq!(game.start_replay(start), vec![GameEvent::ReplayStarted { moves: total }]);
    assert_eq!(game.board().chips().count(), 0);
    assert!(game.sequences().is_empty());

    let mut steps = 0;
    let mut finished = false;
    for tick in 0..=total {
        let events = game.tick_replay(start + INTERVAL * tick as u32);
        steps += events.iter().filter(|e| matches!(e, GameEvent::ReplayStep { .. })).count();
        if events.contains(&GameEvent::ReplayFinished) {
            finished = true;
            break;
        }
    }

    assert!(finished);
    assert_eq!(steps, total);
    assert_eq!(game.overlay(), OverlayMode::ReplayFinished);
    assert_eq!(game.replay_status(), ReplayStatus::Finished);
    assert_eq!(game.replay_progress(), 1.0);
    assert_eq!(game.board(), &final_board);
    assert_eq!(game.sequences(), &final_sequences);
}

// =============================================================================
// Cadence and cancellation
// =============================================================================

#[test]
fn test_one_move_per_tick() {
    let mut game = ai_game(5);
    play(&mut game, 10);
    let start = Instant::now();
    game.start_replay(start);

    assert_eq!(game.tick_replay(start).len(), 1);
    assert!(game.tick_replay(start).is_empty());
    assert!(game.tick_replay(start + INTERVAL / 2).is_empty());
    assert_eq!(game.tick_replay(start + INTERVAL).len(), 1);
    assert_eq!(game.replay_progress(), 2.0 / game.moves().len() as f64);
}

#[test]
fn test_stop_mid_replay_keeps_board() {
    let mut game = ai_game(6);
    play(&mut game, 12);
    let start = Instant::now();
    game.start_replay(start);
    for tick in 0..3u32 {
        game.tick_replay(start + INTERVAL * tick);
    }
    let partial = game.board().clone();

    game.stop_replay();

    assert_eq!(game.replay_status(), ReplayStatus::Idle);
    assert_eq!(game.replay_progress(), 0.0);
    assert!(game.tick_replay(start + INTERVAL * 100).is_empty());
    assert_eq!(game.board(), &partial);
}

#[test]
fn test_commands_ignored_during_replay() {
    let mut game = ai_game(7);
    play(&mut game, 6);
    let start = Instant::now();
    game.start_replay(start);

    assert!(game.play_ai_turn().is_empty());
    assert!(game.end_turn().is_empty());
    assert!(game.pause().is_empty());
    let card = game.current_player().unwrap().hand[0].id;
    assert!(game.select_card(card).is_empty());
    assert!(game.start_replay(start).is_empty());
}

#[test]
fn test_empty_log_finishes_immediately() {
    let mut game = ai_game(8);
    let now = Instant::now();
    game.start_replay(now);

    let events = game.tick_replay(now);

    assert!(events.contains(&GameEvent::ReplayFinished));
    assert_eq!(game.overlay(), OverlayMode::ReplayFinished);
}

#[test]
fn test_restart_after_replay() {
    let mut game = ai_game(9);
    play(&mut game, 4);
    let now = Instant::now();
    game.start_replay(now);
    for tick in 0..10u32 {
        game.tick_replay(now + INTERVAL * tick);
    }
    assert_eq!(game.overlay(), OverlayMode::ReplayFinished);

    game.restart_game().unwrap();

    assert_eq!(game.overlay(), OverlayMode::TurnStart);
    assert_eq!(game.replay_status(), ReplayStatus::Idle);
    assert!(game.moves().is_empty());
}
