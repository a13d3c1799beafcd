//! The game state machine.
//!
//! `Game` is the single mutable root. It owns the board, the live deck,
//! the discard pile, the players and the move log; every other component
//! receives what it needs as a parameter and keeps nothing.
//!
//! ## Commands
//!
//! Every command returns the `GameEvent`s it caused. A command that is not
//! allowed in the current mode, or names a card or tile that is not legal,
//! changes nothing and returns an empty list.
//!
//! ## Example
//!
//! ```
//! use sequence_engine::core::{EngineConfig, SeatConfig, TeamColor};
//! use sequence_engine::game::{Game, OverlayMode};
//!
//! let mut game = Game::new(EngineConfig::default().with_seed(7));
//! game.start_game(SeatConfig::into_players(vec![
//!     SeatConfig::human("Ada", TeamColor::Blue),
//!     SeatConfig::human("Bo", TeamColor::Green),
//! ]));
//!
//! assert_eq!(game.overlay(), OverlayMode::TurnStart);
//! assert_eq!(game.current_player().map(|p| p.hand.len()), Some(7));
//! ```

use std::time::Instant;

use im::Vector;
use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use super::event::GameEvent;
use super::overlay::OverlayMode;
use crate::ai::{AiDecision, AiTurn};
use crate::board::{Board, BoardManager, Position, TileId, BOARD_SIZE};
use crate::cards::{Card, CardId, CardRole, Deck};
use crate::core::{EngineConfig, GameError, GameRng, Player, PlayerId, Team, TeamColor};
use crate::persistence::{GameStateSnapshot, SNAPSHOT_VERSION};
use crate::replay::{GameMove, MoveKind, ReplayController, ReplayRecorder, ReplayStatus};
use crate::rules::{MoveValidator, SequenceDetector, SequenceSet};

/// A game of Sequence.
#[derive(Clone, Debug)]
pub struct Game {
    config: EngineConfig,
    detector: SequenceDetector,
    ai: AiTurn,
    rng: GameRng,
    board: Board,
    deck: Deck,
    discard: Vec<Card>,
    players: Vec<Player>,
    current_turn: usize,
    selected_card: Option<CardId>,
    valid_positions: Vec<Position>,
    overlay: OverlayMode,
    resume_mode: Option<OverlayMode>,
    sequences: SequenceSet,
    winner: Option<TeamColor>,
    recorder: ReplayRecorder,
    replay: ReplayController,
}

impl Game {
    /// An unconfigured game: no players, blank board.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let config = config.normalized();
        Self {
            detector: SequenceDetector::from_config(&config),
            ai: AiTurn::default(),
            rng: GameRng::new(config.seed),
            board: Board::empty(BOARD_SIZE),
            deck: Deck::new(config.deck_count),
            discard: Vec::new(),
            players: Vec::new(),
            current_turn: 0,
            selected_card: None,
            valid_positions: Vec::new(),
            overlay: OverlayMode::TurnStart,
            resume_mode: None,
            sequences: SequenceSet::default(),
            winner: None,
            recorder: ReplayRecorder::new(),
            replay: ReplayController::new(config.replay_interval),
            config,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Seed a new board, shuffle the deck and deal to `players`.
    ///
    /// An empty player list is ignored.
    pub fn start_game(&mut self, players: Vec<Player>) -> Vec<GameEvent> {
        if players.is_empty() {
            warn!("start_game called without players, ignoring");
            return Vec::new();
        }
        self.initialize(players)
    }

    /// Start over with the current players.
    pub fn restart_game(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if self.players.is_empty() {
            return Err(GameError::CannotRestartWithoutPlayers);
        }
        let players = std::mem::take(&mut self.players);
        info!(players = players.len(), "restarting game");
        Ok(self.initialize(players))
    }

    /// Drop players, board and log; back to `Game::new`.
    pub fn reset_game(&mut self) {
        info!("game reset");
        *self = Self::new(self.config.clone());
    }

    fn initialize(&mut self, mut players: Vec<Player>) -> Vec<GameEvent> {
        for player in &mut players {
            player.hand.clear();
        }

        let mut seeding = self.rng.fork();
        self.board = BoardManager::setup_board(
            BOARD_SIZE,
            self.config.deck_count,
            self.config.wild_cards.face,
            &mut seeding,
        );
        self.deck = Deck::new(self.config.deck_count);
        self.deck.shuffle(&mut self.rng);

        let hand_size = self.config.hand_size_for(players.len());
        self.deck.deal(hand_size, &mut players);

        self.players = players;
        self.discard.clear();
        self.current_turn = 0;
        self.selected_card = None;
        self.valid_positions.clear();
        self.overlay = OverlayMode::TurnStart;
        self.resume_mode = None;
        self.sequences.clear();
        self.winner = None;
        self.recorder.clear_moves();
        self.replay.stop();

        info!(
            players = self.players.len(),
            teams = Team::from_players(&self.players).len(),
            hand_size,
            deck_remaining = self.deck.remaining(),
            "game started"
        );
        vec![GameEvent::GameStarted {
            players: self.players.len(),
            hand_size,
        }]
    }

    // =========================================================================
    // Turn commands
    // =========================================================================

    /// Select a card from the current player's hand.
    ///
    /// Computes the legal targets. A card with none puts the game in
    /// `DeadCard` mode; otherwise the mode follows the card's role.
    pub fn select_card(&mut self, card_id: CardId) -> Vec<GameEvent> {
        if !self.accepts_commands() || !self.overlay.accepts_selection() {
            return Vec::new();
        }
        let Some(player) = self.players.get(self.current_turn) else {
            return Vec::new();
        };
        let Some(card) = player.card(card_id).copied() else {
            debug!(player = %player.id, card = %card_id, "selected card not in hand");
            return Vec::new();
        };
        let player_id = player.id;

        let legal = self.legal_positions_for(&card, player.team);
        let mode = if legal.is_empty() {
            OverlayMode::DeadCard
        } else {
            OverlayMode::for_role(card.role(&self.config.wild_cards))
        };

        let mut events = vec![GameEvent::CardSelected {
            player: player_id,
            card,
            legal_positions: legal.len(),
        }];
        self.selected_card = Some(card_id);
        self.valid_positions = legal;
        events.extend(self.set_overlay(mode));
        events
    }

    /// Play the selected card `card_id` at `position`.
    ///
    /// Places a chip, or removes one for a one-eyed wild, then refreshes
    /// sequences, records the move, draws a replacement and advances the
    /// turn. Ends the game when the acting team reaches the win threshold.
    /// `card_id` must be the card last passed to `select_card`.
    pub fn perform_play(&mut self, position: Position, card_id: CardId) -> Vec<GameEvent> {
        if !self.accepts_commands() || !self.overlay.accepts_play() {
            return Vec::new();
        }
        if self.selected_card != Some(card_id) {
            debug!(card = %card_id, selected = ?self.selected_card, "play with unselected card ignored");
            return Vec::new();
        }
        let Some(player) = self.players.get(self.current_turn) else {
            return Vec::new();
        };
        let Some(card) = player.card(card_id).copied() else {
            return Vec::new();
        };
        let (player_id, team) = (player.id, player.team);

        if !self.legal_positions_for(&card, team).contains(&position) {
            debug!(player = %player_id, card = %card, row = position.row, col = position.col, "illegal play ignored");
            return Vec::new();
        }

        let mut events = Vec::new();
        let kind = match card.role(&self.config.wild_cards) {
            CardRole::RemoveOpponent => {
                let owner = self.board.tile(position).and_then(|t| t.chip_team());
                if !BoardManager::remove_chip(&mut self.board, position, &self.sequences) {
                    return Vec::new();
                }
                if let Some(owner) = owner {
                    events.push(GameEvent::ChipRemoved {
                        player: player_id,
                        team: owner,
                        position,
                    });
                }
                MoveKind::Remove
            }
            CardRole::Standard | CardRole::PlaceAnywhere => {
                if !BoardManager::place_chip(&mut self.board, position, team) {
                    return Vec::new();
                }
                events.push(GameEvent::ChipPlaced {
                    player: player_id,
                    team,
                    position,
                });
                MoveKind::Place
            }
        };

        if let Some(played) = self.players.get_mut(self.current_turn).and_then(|p| p.take_card(card_id)) {
            self.discard.push(played);
        }

        let detection = self.detector.detect(&self.board, &self.sequences);
        self.sequences = detection.sequences;
        for &id in &detection.completed {
            if let Some(sequence) = self.sequences.get(id) {
                events.push(GameEvent::SequenceCompleted {
                    team: sequence.team,
                    sequence: id,
                });
            }
        }

        if let Some(player) = self.players.get(self.current_turn) {
            self.recorder
                .record_move(Some(position), card, player, kind, detection.completed.len());
        }
        debug!(
            player = %player_id,
            ?team,
            card = %card,
            row = position.row,
            col = position.col,
            ?kind,
            "play accepted"
        );

        events.extend(self.draw_for_current());
        self.selected_card = None;
        self.valid_positions.clear();

        // Only the acting team's count can have grown.
        if self.sequences.count_for(team) >= self.config.sequences_to_win {
            self.current_turn = (self.current_turn + 1) % self.players.len();
            events.extend(self.finish(Some(team)));
            return events;
        }

        events.extend(self.advance_turn());
        if self.overlay != OverlayMode::GameOver {
            events.extend(self.set_overlay(OverlayMode::PostPlacement));
        }
        events
    }

    /// Discard the selected dead card and draw a replacement. The same
    /// player keeps the turn.
    pub fn replace_currently_selected_dead_card(&mut self) -> Vec<GameEvent> {
        if !self.accepts_commands() || self.overlay != OverlayMode::DeadCard {
            return Vec::new();
        }
        let Some(card_id) = self.selected_card else {
            return Vec::new();
        };
        let Some(player) = self.players.get_mut(self.current_turn) else {
            return Vec::new();
        };
        let Some(card) = player.take_card(card_id) else {
            return Vec::new();
        };
        let player_id = player.id;
        self.recorder.record_move(None, card, player, MoveKind::DeadCardReplace, 0);
        self.discard.push(card);
        debug!(player = %player_id, card = %card, "dead card replaced");

        let mut events = vec![GameEvent::DeadCardReplaced {
            player: player_id,
            card,
        }];
        events.extend(self.draw_for_current());
        self.selected_card = None;
        self.valid_positions.clear();

        let hand_empty = self.players.get(self.current_turn).map_or(true, |p| p.hand.is_empty());
        if hand_empty {
            events.extend(self.advance_turn());
            if self.overlay == OverlayMode::GameOver {
                return events;
            }
        }
        events.extend(self.set_overlay(OverlayMode::TurnStart));
        events
    }

    /// Acknowledge a placement and hand over to the next player.
    pub fn end_turn(&mut self) -> Vec<GameEvent> {
        if !self.accepts_commands() || self.overlay != OverlayMode::PostPlacement {
            return Vec::new();
        }
        self.set_overlay(OverlayMode::TurnStart)
    }

    /// Freeze the game. `resume` returns to the interrupted mode.
    pub fn pause(&mut self) -> Vec<GameEvent> {
        if !self.accepts_commands() || self.overlay == OverlayMode::Paused {
            return Vec::new();
        }
        self.resume_mode = Some(self.overlay);
        self.set_overlay(OverlayMode::Paused)
    }

    pub fn resume(&mut self) -> Vec<GameEvent> {
        if self.overlay != OverlayMode::Paused {
            return Vec::new();
        }
        let mode = self.resume_mode.take().unwrap_or_default();
        self.set_overlay(mode)
    }

    /// Let the AI take the current player's turn.
    ///
    /// Goes through `select_card` and then `perform_play` or
    /// `replace_currently_selected_dead_card`, exactly like a human.
    /// Ignored for human players or outside `TurnStart`.
    pub fn play_ai_turn(&mut self) -> Vec<GameEvent> {
        if !self.accepts_commands() {
            return Vec::new();
        }
        let Some(player) = self.players.get(self.current_turn) else {
            return Vec::new();
        };
        if !player.is_ai || self.overlay != OverlayMode::TurnStart {
            return Vec::new();
        }

        let decision = self.ai.decide(
            player,
            &self.board,
            &self.sequences,
            &self.config.wild_cards,
            self.config.sequence_length,
            &mut self.rng,
        );
        let mut events = Vec::new();
        match decision {
            Some(AiDecision::Play { card_id, position }) => {
                events.extend(self.select_card(card_id));
                events.extend(self.perform_play(position, card_id));
            }
            Some(AiDecision::ReplaceDeadCard { card_id }) => {
                events.extend(self.select_card(card_id));
                events.extend(self.replace_currently_selected_dead_card());
            }
            None => {}
        }
        events
    }

    // =========================================================================
    // Replay
    // =========================================================================

    /// Clear the chips and start re-playing the move log from move 0.
    pub fn start_replay(&mut self, now: Instant) -> Vec<GameEvent> {
        if self.players.is_empty() || self.replay.is_playing() {
            return Vec::new();
        }
        self.board.clear_chips();
        self.sequences.clear();
        self.selected_card = None;
        self.valid_positions.clear();
        self.replay.start(now);
        info!(moves = self.recorder.len(), interval_ms = self.replay.interval().as_millis() as u64, "replay started");
        vec![GameEvent::ReplayStarted {
            moves: self.recorder.len(),
        }]
    }

    /// Apply the next recorded move if it is due at `now`.
    pub fn tick_replay(&mut self, now: Instant) -> Vec<GameEvent> {
        if !self.replay.is_playing() {
            return Vec::new();
        }
        let mut events = Vec::new();
        if let Some(index) = self.replay.tick(now, self.recorder.len()) {
            if let Some(mv) = self.recorder.get(index) {
                let sequences_completed =
                    ReplayController::apply_move(&mut self.board, &mut self.sequences, &self.detector, mv);
                events.push(GameEvent::ReplayStep {
                    index,
                    move_number: mv.move_number,
                    sequences_completed,
                });
            }
        }
        if self.replay.status() == ReplayStatus::Finished {
            info!(moves = self.recorder.len(), "replay finished");
            self.resume_mode = None;
            events.extend(self.set_overlay(OverlayMode::ReplayFinished));
            events.push(GameEvent::ReplayFinished);
        }
        events
    }

    /// Halt replay and rewind its index. The board keeps whatever was
    /// replayed so far.
    pub fn stop_replay(&mut self) {
        if self.replay.is_playing() {
            info!(at = self.replay.index(), "replay stopped");
        }
        self.replay.stop();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Teams present, derived from the players.
    #[must_use]
    pub fn teams(&self) -> Vec<Team> {
        Team::from_players(&self.players)
    }

    #[must_use]
    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_turn)
    }

    #[must_use]
    pub fn overlay(&self) -> OverlayMode {
        self.overlay
    }

    #[must_use]
    pub fn selected_card(&self) -> Option<CardId> {
        self.selected_card
    }

    /// Legal targets for the selected card, row-major.
    #[must_use]
    pub fn valid_positions(&self) -> &[Position] {
        &self.valid_positions
    }

    /// Tiles inside a detected sequence.
    #[must_use]
    pub fn protected_tiles(&self) -> &FxHashSet<TileId> {
        self.sequences.protected()
    }

    #[must_use]
    pub fn sequences(&self) -> &SequenceSet {
        &self.sequences
    }

    #[must_use]
    pub fn winner(&self) -> Option<TeamColor> {
        self.winner
    }

    #[must_use]
    pub fn moves(&self) -> &Vector<GameMove> {
        self.recorder.moves()
    }

    #[must_use]
    pub fn replay_status(&self) -> ReplayStatus {
        self.replay.status()
    }

    /// Fraction of the move log replayed, `0.0..=1.0`.
    #[must_use]
    pub fn replay_progress(&self) -> f64 {
        self.replay.progress(self.recorder.len())
    }

    #[must_use]
    pub fn detector(&self) -> &SequenceDetector {
        &self.detector
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Capture the full game.
    #[must_use]
    pub fn snapshot(&self) -> GameStateSnapshot {
        GameStateSnapshot {
            version: SNAPSHOT_VERSION,
            config: self.config.clone(),
            rng: self.rng.state(),
            board: self.board.clone(),
            deck: self.deck.clone(),
            discard: self.discard.clone(),
            players: self.players.clone(),
            current_turn: self.current_turn,
            overlay: self.overlay,
            resume_mode: self.resume_mode,
            selected_card: self.selected_card,
            valid_positions: self.valid_positions.clone(),
            sequences: self.sequences.clone(),
            winner: self.winner,
            moves: self.recorder.moves().clone(),
        }
    }

    /// Rebuild a game from a snapshot. The replay controller starts idle.
    #[must_use]
    pub fn from_snapshot(snapshot: GameStateSnapshot) -> Self {
        Self {
            detector: SequenceDetector::from_config(&snapshot.config),
            ai: AiTurn::default(),
            rng: GameRng::from_state(&snapshot.rng),
            board: snapshot.board,
            deck: snapshot.deck,
            discard: snapshot.discard,
            players: snapshot.players,
            current_turn: snapshot.current_turn,
            selected_card: snapshot.selected_card,
            valid_positions: snapshot.valid_positions,
            overlay: snapshot.overlay,
            resume_mode: snapshot.resume_mode,
            sequences: snapshot.sequences,
            winner: snapshot.winner,
            recorder: ReplayRecorder::from_moves(snapshot.moves),
            replay: ReplayController::new(snapshot.config.replay_interval),
            config: snapshot.config,
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Commands other than pause/resume/replay need players, a live game
    /// and no running replay.
    fn accepts_commands(&self) -> bool {
        !self.players.is_empty() && !self.overlay.is_terminal() && !self.replay.is_playing()
    }

    fn legal_positions_for(&self, card: &Card, team: TeamColor) -> Vec<Position> {
        MoveValidator::legal_positions(card, team, &self.board, &self.sequences, &self.config.wild_cards)
    }

    fn set_overlay(&mut self, mode: OverlayMode) -> Vec<GameEvent> {
        if self.overlay == mode {
            return Vec::new();
        }
        let from = self.overlay;
        self.overlay = mode;
        vec![GameEvent::OverlayChanged { from, to: mode }]
    }

    /// Draw one card into the current player's hand.
    fn draw_for_current(&mut self) -> Vec<GameEvent> {
        let Some(player) = self.players.get_mut(self.current_turn) else {
            return Vec::new();
        };
        match self.deck.draw() {
            Some(card) => {
                player.hand.push(card);
                vec![GameEvent::CardDrawn { player: player.id }]
            }
            None => {
                debug!(player = %player.id, "deck exhausted, no replacement drawn");
                vec![GameEvent::DeckExhausted { player: player.id }]
            }
        }
    }

    /// Move to the next player holding cards. Ends the game as a draw when
    /// every hand is empty.
    fn advance_turn(&mut self) -> Vec<GameEvent> {
        let count = self.players.len();
        if count == 0 {
            return Vec::new();
        }
        let next = (1..=count)
            .map(|step| (self.current_turn + step) % count)
            .find(|&i| !self.players[i].hand.is_empty());

        match next {
            Some(index) => {
                self.current_turn = index;
                vec![GameEvent::TurnAdvanced {
                    player: self.players[index].id,
                }]
            }
            None => {
                self.current_turn = (self.current_turn + 1) % count;
                self.finish(None)
            }
        }
    }

    fn finish(&mut self, winner: Option<TeamColor>) -> Vec<GameEvent> {
        self.winner = winner;
        match winner {
            Some(team) => info!(winner = %team, sequences = self.sequences.count_for(team), "game over"),
            None => info!("game over, all hands empty"),
        }
        let mut events = self.set_overlay(OverlayMode::GameOver);
        events.push(GameEvent::GameOver { winner });
        events
    }
}
