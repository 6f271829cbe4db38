//! Session configuration from environment variables
//!
//! - `BLOCKFALL_SEED`: piece order seed (u32); unset seeds from the clock
//! - `BLOCKFALL_BOARD_WIDTH` / `BLOCKFALL_BOARD_HEIGHT`: board size (default 10x20)
//! - `BLOCKFALL_LOG_PATH`: append JSON-lines game events to this file

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use blockfall_core::GameConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub game: GameConfig,
    pub log_path: Option<PathBuf>,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`SessionConfig::from_env`] with a custom variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = GameConfig::default();

        let game = GameConfig {
            board_width: parse_var(&lookup, "BLOCKFALL_BOARD_WIDTH")
                .unwrap_or(defaults.board_width),
            board_height: parse_var(&lookup, "BLOCKFALL_BOARD_HEIGHT")
                .unwrap_or(defaults.board_height),
            seed: parse_var(&lookup, "BLOCKFALL_SEED"),
        };

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self { game, log_path }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}
