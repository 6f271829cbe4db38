//! Core-side events emitted by state transitions.
//!
//! The game state queues these; hosts drain them after each step and decide
//! what to do with them (logging, sounds, HUD flashes).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// A piece was written into the board.
    #[serde(rename_all = "camelCase")]
    Locked {
        lines_cleared: u32,
        /// Points from the line clear (drop bonus excluded).
        points: u32,
        score: u32,
        lines: u32,
    },
    LevelUp {
        level: u32,
    },
    Paused,
    Resumed,
    #[serde(rename_all = "camelCase")]
    GameOver {
        score: u32,
        lines: u32,
        level: u32,
    },
    Restarted,
}
