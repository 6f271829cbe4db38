//! Single-actor game session
//!
//! A session owns one game, one clock and one intent queue. Hosts push
//! intents from any input source and call [`Session::pump`] regularly (every
//! frame, or on a timer); queued intents and the gravity tick are applied
//! there one after another, so game state is never mutated from two places at
//! once. Several sessions can run side by side; they share nothing.

use std::collections::VecDeque;

use anyhow::{Context, Result};

use blockfall_core::{CoreError, GameEvent, GameState};
use blockfall_types::GameAction;

use crate::clock::Clock;
use crate::config::SessionConfig;
use crate::event_log::EventLog;

/// What one call to [`Session::pump`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PumpReport {
    /// Clock reading used for this pump.
    pub now_ms: u64,
    /// Intents that changed the game.
    pub applied: usize,
    /// Intents that were ignored (blocked move, wrong status).
    pub ignored: usize,
    /// Whether gravity moved or locked the piece.
    pub gravity_step: bool,
    pub events: Vec<GameEvent>,
}

#[derive(Debug)]
pub struct Session<C: Clock> {
    game: GameState,
    clock: C,
    inbox: VecDeque<GameAction>,
    log: Option<EventLog>,
    log_error: Option<String>,
}

impl<C: Clock> Session<C> {
    pub fn new(game: GameState, clock: C) -> Self {
        Self {
            game,
            clock,
            inbox: VecDeque::new(),
            log: None,
            log_error: None,
        }
    }

    /// Build the game and optional event log described by `config`.
    pub fn from_config(config: &SessionConfig, clock: C) -> Result<Self> {
        let game = GameState::with_config(config.game).context("creating game")?;
        let mut session = Self::new(game, clock);
        if let Some(path) = &config.log_path {
            session.log = Some(EventLog::open(path)?);
        }
        Ok(session)
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Queue an intent for the next pump.
    pub fn push(&mut self, action: GameAction) {
        self.inbox.push_back(action);
    }

    pub fn pending(&self) -> usize {
        self.inbox.len()
    }

    /// Last event log failure. Logging stops after the first one.
    pub fn log_error(&self) -> Option<&str> {
        self.log_error.as_deref()
    }

    /// Apply queued intents in order, then run one gravity tick, all at the
    /// same clock reading.
    ///
    /// On error the remaining intents are dropped; events produced before
    /// the failure are still drained and logged.
    pub fn pump(&mut self) -> std::result::Result<PumpReport, CoreError> {
        let now_ms = self.clock.now_ms();
        let mut report = PumpReport {
            now_ms,
            ..PumpReport::default()
        };

        let outcome = self.step(&mut report);
        self.finish(report, outcome)
    }

    fn step(&mut self, report: &mut PumpReport) -> std::result::Result<(), CoreError> {
        while let Some(action) = self.inbox.pop_front() {
            if self.game.apply_action(action, report.now_ms)? {
                report.applied += 1;
            } else {
                report.ignored += 1;
            }
        }

        report.gravity_step = self.game.tick(report.now_ms)?;
        Ok(())
    }

    fn finish(
        &mut self,
        mut report: PumpReport,
        outcome: std::result::Result<(), CoreError>,
    ) -> std::result::Result<PumpReport, CoreError> {
        report.events = self.game.drain_events().collect();
        self.record(report.now_ms, &report.events);

        if outcome.is_err() {
            self.inbox.clear();
        }
        outcome.map(|()| report)
    }

    fn record(&mut self, now_ms: u64, events: &[GameEvent]) {
        let Some(log) = self.log.as_mut() else {
            return;
        };
        if events.is_empty() {
            return;
        }

        let result = events
            .iter()
            .try_for_each(|event| log.write(now_ms, event))
            .and_then(|()| log.flush());

        if let Err(err) = result {
            self.log_error = Some(format!("{err:#}"));
            self.log = None;
        }
    }
}
