//! Core error type.
//!
//! Blocked moves, rotations and spawns are ordinary gameplay results and never
//! show up here. These variants are contract violations by the caller.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },

    #[error("board size {width}x{height} is not supported")]
    InvalidDimensions { width: u8, height: u8 },
}

pub type Result<T> = std::result::Result<T, CoreError>;
