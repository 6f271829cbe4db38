//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has
//! **no dependencies** on rendering, input devices, or I/O, making it:
//!
//! - **Deterministic**: Same seed (or piece sequence) and same clock readings
//!   produce identical games
//! - **Testable**: Every rule is reachable without a terminal or a timer
//! - **Portable**: Any host can drive it (terminal, GUI, headless server)
//!
//! # Module Structure
//!
//! - [`pieces`]: Tetromino catalog and the clockwise rotation operator
//! - [`board`]: Grid with collision queries, stamping, and line clearing
//! - [`rng`]: Piece sources (uniform i.i.d. or a fixed sequence)
//! - [`spawner`]: Next-piece queue and spawn position
//! - [`piece`]: Active piece controller (move / rotate / drop / lock)
//! - [`scoring`]: Line clear points, level and gravity speed
//! - [`game_state`]: Status machine, intents and gravity ticks
//! - [`snapshot`]: Read-only view for renderers
//!
//! # Game Rules
//!
//! - **Random pieces**: Each piece is drawn uniformly, independent of history
//! - **Plain rotation**: 90° clockwise matrix rotation, no wall kicks
//! - **Immediate lock**: A piece locks the moment it fails to move down
//! - **Scoring**: 40/100/300/1200 × level for 1-4 lines, 2 points per hard-drop row
//! - **Levels**: One level per 10 lines, gravity 1000ms - 50ms per level (min 50ms)
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, GameStatus};
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight, 0).unwrap();
//! game.apply_action(GameAction::Rotate, 0).unwrap();
//! game.apply_action(GameAction::HardDrop, 0).unwrap();
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert_eq!(game.status(), GameStatus::Running);
//! ```
//!
//! # Timing
//!
//! The core never reads a clock. Hosts pass the current time in milliseconds
//! to [`GameState::tick`](game_state::GameState::tick); gravity steps once
//! more than the level's drop interval has elapsed since the previous step.

pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod spawner;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use error::{CoreError, Result};
pub use events::GameEvent;
pub use game_state::GameState;
pub use piece::{ActivePiece, LockResult};
pub use pieces::{rotate_cw, shape_at, shapes_count, spawn_shape, Shape};
pub use rng::{PieceSource, SequenceSource, SimpleRng, UniformSource};
pub use scoring::{apply_clear, calculate_drop_score, calculate_line_score, Progression};
pub use snapshot::{ActiveSnapshot, GameSnapshot, ProgressionSnapshot};
pub use spawner::{spawn_origin, Spawner};
