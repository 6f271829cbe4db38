//! Session engine - drives a [`blockfall_core::GameState`] from a host.
//!
//! The core is clock-free and I/O-free. This crate adds what a host needs
//! around it:
//!
//! - [`clock`]: injectable time sources (wall clock, manual clock for tests)
//! - [`session`]: one serialized actor per game (intent queue + gravity tick)
//! - [`config`]: environment-driven session setup
//! - [`event_log`]: JSON-lines record of game events
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_engine::{ManualClock, Session};
//! use blockfall_types::GameAction;
//!
//! let clock = ManualClock::new(0);
//! let mut session = Session::new(GameState::new(7), clock.clone());
//!
//! session.push(GameAction::MoveLeft);
//! session.pump().unwrap();
//!
//! clock.advance(1001);
//! let report = session.pump().unwrap();
//! assert!(report.gravity_step);
//! ```

pub mod clock;
pub mod config;
pub mod event_log;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SessionConfig;
pub use event_log::EventLog;
pub use session::{PumpReport, Session};
