//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, active piece,
//! spawner, and progression. It owns the running/paused/over status, routes
//! intents, and applies gravity from an externally supplied clock.
//!
//! Each `GameState` is an independent session; nothing here is global.

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::Result;
use crate::events::GameEvent;
use crate::piece::{ActivePiece, LockResult};
use crate::pieces::Shape;
use crate::rng::{PieceSource, UniformSource};
use crate::scoring::Progression;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::spawner::Spawner;
use crate::types::{Cell, GameAction, GameStatus};

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    board: Board,
    active: ActivePiece,
    spawner: Spawner,
    progression: Progression,
    status: GameStatus,
    /// Clock reading (ms) of the last gravity step or soft drop.
    last_drop_ms: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game on the standard board with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::build(Board::new(), Box::new(UniformSource::new(seed)))
    }

    /// Create a new game from a config
    pub fn with_config(config: GameConfig) -> Result<Self> {
        let source = config
            .seed
            .map_or_else(UniformSource::from_entropy, UniformSource::new);
        Self::with_source(config, Box::new(source))
    }

    /// Create a new game with an explicit piece source (`config.seed` is ignored)
    pub fn with_source(config: GameConfig, source: Box<dyn PieceSource>) -> Result<Self> {
        let board = Board::with_size(config.board_width, config.board_height)?;
        Ok(Self::build(board, source))
    }

    fn build(board: Board, source: Box<dyn PieceSource>) -> Self {
        let mut spawner = Spawner::new(source);
        let active = ActivePiece::spawn(spawner.next(), board.width());
        let mut state = Self {
            board,
            active,
            spawner,
            progression: Progression::new(),
            status: GameStatus::Running,
            last_drop_ms: 0,
            events: Vec::new(),
        };
        state.check_spawn();
        state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn lines(&self) -> u32 {
        self.progression.lines()
    }

    pub fn progression(&self) -> Progression {
        self.progression
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    pub fn next_piece(&self) -> &Shape {
        self.spawner.peek()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Owned copy of the grid for drawing
    pub fn board_snapshot(&self) -> Vec<Vec<Cell>> {
        self.board.to_rows()
    }

    pub fn last_drop_ms(&self) -> u64 {
        self.last_drop_ms
    }

    /// Origin row a hard drop would land the active piece on
    pub fn ghost_y(&self) -> i32 {
        self.active.ghost_y(&self.board)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.to_id_rows(),
            active: ActiveSnapshot::new(self.active, self.ghost_y()),
            next: *self.spawner.peek(),
            progression: self.progression.into(),
            status: self.status,
        }
    }

    /// Take the events queued since the last call.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn move_left(&mut self) -> bool {
        self.status.is_running() && self.active.try_move(&self.board, -1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.status.is_running() && self.active.try_move(&self.board, 1, 0)
    }

    pub fn rotate(&mut self) -> bool {
        self.status.is_running() && self.active.try_rotate(&self.board)
    }

    /// Move down one row, locking the piece if it cannot descend.
    /// Restarts the gravity interval from `now_ms`.
    pub fn soft_drop(&mut self, now_ms: u64) -> Result<bool> {
        if !self.status.is_running() {
            return Ok(false);
        }
        self.gravity_step()?;
        self.last_drop_ms = now_ms;
        Ok(true)
    }

    /// Drop to the floor and lock. Returns the rows descended.
    pub fn hard_drop(&mut self) -> Result<Option<u32>> {
        if !self.status.is_running() {
            return Ok(None);
        }
        let rows = self.active.hard_drop(&self.board, &mut self.progression);
        self.lock_active()?;
        Ok(Some(rows))
    }

    /// Running <-> Paused. Ignored once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Running => {
                self.status = GameStatus::Paused;
                self.events.push(GameEvent::Paused);
                true
            }
            GameStatus::Paused => {
                self.status = GameStatus::Running;
                self.events.push(GameEvent::Resumed);
                true
            }
            GameStatus::GameOver => false,
        }
    }

    /// Start over after game over. The piece source keeps its sequence.
    pub fn restart(&mut self, now_ms: u64) -> bool {
        if self.status != GameStatus::GameOver {
            return false;
        }

        self.board.clear();
        self.progression = Progression::new();
        self.spawner.reset();
        self.active = ActivePiece::spawn(self.spawner.next(), self.board.width());
        self.status = GameStatus::Running;
        self.last_drop_ms = now_ms;
        self.events.push(GameEvent::Restarted);
        self.check_spawn();
        true
    }

    /// Gravity: one step down once more than the drop interval has passed
    /// since the last step. Returns whether a step ran.
    pub fn tick(&mut self, now_ms: u64) -> Result<bool> {
        if !self.status.is_running() {
            return Ok(false);
        }

        let elapsed = now_ms.saturating_sub(self.last_drop_ms);
        if elapsed <= self.progression.drop_interval_ms() as u64 {
            return Ok(false);
        }

        self.gravity_step()?;
        self.last_drop_ms = now_ms;
        Ok(true)
    }

    /// Apply an intent. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction, now_ms: u64) -> Result<bool> {
        match action {
            GameAction::MoveLeft => Ok(self.move_left()),
            GameAction::MoveRight => Ok(self.move_right()),
            GameAction::SoftDrop => self.soft_drop(now_ms),
            GameAction::Rotate => Ok(self.rotate()),
            GameAction::HardDrop => Ok(self.hard_drop()?.is_some()),
            GameAction::TogglePause => Ok(self.toggle_pause()),
            GameAction::Restart => Ok(self.restart(now_ms)),
        }
    }

    fn gravity_step(&mut self) -> Result<()> {
        if !self.active.try_move(&self.board, 0, 1) {
            self.lock_active()?;
        }
        Ok(())
    }

    /// Lock the active piece onto the board and handle line clears
    fn lock_active(&mut self) -> Result<LockResult> {
        let level_before = self.progression.level();
        let result = self.active.lock_and_advance(
            &mut self.spawner,
            &mut self.board,
            &mut self.progression,
        )?;

        self.events.push(GameEvent::Locked {
            lines_cleared: result.lines_cleared as u32,
            points: result.points,
            score: self.progression.score(),
            lines: self.progression.lines(),
        });
        if self.progression.level() > level_before {
            self.events.push(GameEvent::LevelUp {
                level: self.progression.level(),
            });
        }
        if result.is_game_over {
            self.enter_game_over();
        }
        Ok(result)
    }

    fn check_spawn(&mut self) {
        if self.active.collides(&self.board) {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        self.status = GameStatus::GameOver;
        self.events.push(GameEvent::GameOver {
            score: self.progression.score(),
            lines: self.progression.lines(),
            level: self.progression.level(),
        });
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;
    use crate::types::PieceKind;

    fn game_with(kinds: &[PieceKind]) -> GameState {
        GameState::with_source(
            GameConfig::default(),
            Box::new(SequenceSource::new(kinds.to_vec()).unwrap()),
        )
        .unwrap()
    }

    /// Fill `y` except for the given columns
    fn fill_row_except(state: &mut GameState, y: i32, holes: &[i32]) {
        for x in 0..10 {
            if !holes.contains(&x) {
                state.board_mut().set(x, y, Some(PieceKind::Z)).unwrap();
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.status(), GameStatus::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.progression().drop_interval_ms(), 1000);
        assert_eq!(state.board().occupied_count(), 0);
        assert_eq!(state.active().y, 0);
    }

    #[test]
    fn test_first_piece_then_preview() {
        let state = game_with(&[PieceKind::L, PieceKind::J]);
        assert_eq!(state.active().shape.kind(), Some(PieceKind::L));
        assert_eq!(state.next_piece().kind(), Some(PieceKind::J));
    }

    #[test]
    fn test_with_config_rejects_bad_board() {
        let config = GameConfig {
            board_width: 2,
            ..GameConfig::with_seed(1)
        };
        assert!(GameState::with_config(config).is_err());
    }

    #[test]
    fn test_o_piece_lands_on_floor() {
        let mut state = game_with(&[PieceKind::O]);
        assert_eq!((state.active().x, state.active().y), (4, 0));

        for step in 0..18 {
            assert!(state.soft_drop(step).unwrap());
            assert_eq!(state.active().y, step as i32 + 1);
        }
        assert_eq!(state.board().occupied_count(), 0);

        // Next attempt is blocked by the floor and locks the piece.
        assert!(state.soft_drop(18).unwrap());
        let board = state.board();
        assert_eq!(board.occupied_count(), 4);
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(board.get(x, y), Ok(Some(PieceKind::O)));
        }
        assert_eq!((state.active().x, state.active().y), (4, 0));
        assert_eq!(state.status(), GameStatus::Running);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_completing_bottom_row_scores() {
        // I piece upright drops into the single gap at column 9.
        let mut state = game_with(&[PieceKind::I]);
        fill_row_except(&mut state, 19, &[9]);

        assert!(state.rotate());
        while state.move_right() {}
        assert_eq!(state.active().x, 9);

        let rows = state.hard_drop().unwrap();
        assert_eq!(rows, Some(16));
        assert_eq!(state.lines(), 1);
        assert_eq!(state.score(), 16 * 2 + 40);
        // Bottom row now holds the rest of the bar, shifted down.
        let board = state.board();
        assert_eq!(board.occupied_count(), 3);
        for x in 0..9 {
            assert_eq!(board.get(x, 19), Ok(None));
        }
        assert_eq!(board.get(9, 19), Ok(Some(PieceKind::I)));
    }

    #[test]
    fn test_clear_scored_at_current_level() {
        let mut state = game_with(&[PieceKind::I]);
        state.progression = Progression::from_lines(0, 20);
        fill_row_except(&mut state, 19, &[0, 1, 2, 3]);
        fill_row_except(&mut state, 18, &[0, 1, 2, 3]);

        // Flat bar to the left wall, twice.
        while state.move_left() {}
        state.hard_drop().unwrap();
        let score_after_first = state.score();
        assert_eq!(state.lines(), 21);
        assert_eq!(score_after_first, 19 * 2 + 40 * 3);

        while state.move_left() {}
        state.hard_drop().unwrap();
        assert_eq!(state.lines(), 22);
        assert_eq!(state.board().occupied_count(), 0);
    }

    #[test]
    fn test_level_up_event() {
        let mut state = game_with(&[PieceKind::I]);
        state.progression = Progression::from_lines(0, 9);
        fill_row_except(&mut state, 19, &[0, 1, 2, 3]);
        while state.move_left() {}
        state.hard_drop().unwrap();

        assert_eq!(state.level(), 2);
        assert_eq!(state.progression().drop_interval_ms(), 950);
        let events: Vec<_> = state.drain_events().collect();
        assert!(events.contains(&GameEvent::LevelUp { level: 2 }));
        assert!(state.drain_events().next().is_none());
    }

    #[test]
    fn test_tick_gravity_strictly_after_interval() {
        let mut state = game_with(&[PieceKind::T]);

        assert!(!state.tick(500).unwrap());
        assert!(!state.tick(1000).unwrap());
        assert_eq!(state.active().y, 0);

        assert!(state.tick(1001).unwrap());
        assert_eq!(state.active().y, 1);
        assert_eq!(state.last_drop_ms(), 1001);

        assert!(!state.tick(2001).unwrap());
        assert!(state.tick(2002).unwrap());
        assert_eq!(state.active().y, 2);
    }

    #[test]
    fn test_soft_drop_resets_gravity_timer() {
        let mut state = game_with(&[PieceKind::T]);
        assert!(state.soft_drop(900).unwrap());
        assert_eq!(state.active().y, 1);
        // Would have dropped at 1001 without the soft drop.
        assert!(!state.tick(1500).unwrap());
        assert!(state.tick(1901).unwrap());
        assert_eq!(state.active().y, 2);
    }

    #[test]
    fn test_pause_stops_game() {
        let mut state = game_with(&[PieceKind::T]);
        assert!(state.toggle_pause());
        assert!(state.paused());

        let before = state.active();
        assert!(!state.move_left());
        assert!(!state.rotate());
        assert!(!state.soft_drop(10).unwrap());
        assert_eq!(state.hard_drop().unwrap(), None);
        assert!(!state.tick(5000).unwrap());
        assert_eq!(state.active(), before);

        assert!(state.toggle_pause());
        assert_eq!(state.status(), GameStatus::Running);
        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(events, vec![GameEvent::Paused, GameEvent::Resumed]);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut state = game_with(&[PieceKind::O]);
        assert!(!state.restart(0));
        state.toggle_pause();
        assert!(!state.restart(0));
        assert!(state.paused());
    }

    #[test]
    fn test_game_over_detection() {
        let mut state = game_with(&[PieceKind::O]);
        // Tall stack under the spawn columns, one gap per row so nothing clears.
        for y in 2..20 {
            fill_row_except(&mut state, y, &[0]);
        }

        state.hard_drop().unwrap();
        assert_eq!(state.status(), GameStatus::GameOver);
        let events: Vec<_> = state.drain_events().collect();
        assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));

        let board_before = state.board().clone();
        let active_before = state.active();
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::Rotate,
            GameAction::HardDrop,
            GameAction::TogglePause,
        ] {
            assert!(!state.apply_action(action, 10_000).unwrap());
        }
        assert!(!state.tick(100_000).unwrap());
        assert_eq!(state.board(), &board_before);
        assert_eq!(state.active(), active_before);
        assert_eq!(state.status(), GameStatus::GameOver);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = game_with(&[PieceKind::O, PieceKind::T]);
        for y in 2..20 {
            fill_row_except(&mut state, y, &[0]);
        }
        state.progression = Progression::from_lines(300, 12);
        state.hard_drop().unwrap();
        assert!(state.game_over());

        assert!(state.apply_action(GameAction::Restart, 7000).unwrap());
        assert_eq!(state.status(), GameStatus::Running);
        assert_eq!(state.board().occupied_count(), 0);
        assert_eq!(state.progression(), Progression::new());
        assert_eq!(state.last_drop_ms(), 7000);
        assert_eq!(state.active().y, 0);
        assert!(!state.tick(8000).unwrap());
        assert!(state.tick(8001).unwrap());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = game_with(&[PieceKind::O, PieceKind::I]);
        state.move_left();
        let snap = state.snapshot();
        assert_eq!(snap.board.len(), 20);
        assert_eq!(snap.board[0].len(), 10);
        assert_eq!(snap.active.x, 3);
        assert_eq!(snap.active.ghost_y, 18);
        assert_eq!(snap.next.kind(), Some(PieceKind::I));
        assert_eq!(snap.progression.level, 1);
        assert!(snap.playable());
    }
}
