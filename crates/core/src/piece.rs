//! Active piece controller
//!
//! Holds the falling piece (shape + origin). Every move and rotation is
//! checked against the board first and either fully commits or leaves the
//! piece untouched.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::Result;
use crate::pieces::{rotate_cw, Shape};
use crate::scoring::{apply_clear, calculate_drop_score, Progression};
use crate::spawner::{spawn_origin, Spawner};

/// Outcome of locking the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockResult {
    pub lines_cleared: usize,
    /// Points awarded for the cleared lines.
    pub points: u32,
    /// The replacement piece collides at its spawn origin.
    pub is_game_over: bool,
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivePiece {
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Place `shape` at its spawn origin on a board `board_width` wide
    pub fn spawn(shape: Shape, board_width: u8) -> Self {
        let (x, y) = spawn_origin(&shape, board_width);
        Self { shape, x, y }
    }

    /// Whether the piece overlaps something where it stands
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }

    /// Try to shift the piece; commits and returns true only if the target is clear
    pub fn try_move(&mut self, board: &Board, dx: i32, dy: i32) -> bool {
        let (x, y) = (self.x + dx, self.y + dy);
        if board.collides(&self.shape, x, y) {
            return false;
        }
        *self = Self { x, y, ..*self };
        true
    }

    /// Try to rotate clockwise in place (same origin, no kicks)
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let rotated = rotate_cw(&self.shape);
        if board.collides(&rotated, self.x, self.y) {
            return false;
        }
        *self = Self {
            shape: rotated,
            ..*self
        };
        true
    }

    /// Check if the piece is resting on something
    pub fn is_grounded(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y + 1)
    }

    /// Row the origin would reach if dropped straight down
    pub fn ghost_y(&self, board: &Board) -> i32 {
        let mut ghost = *self;
        while !ghost.is_grounded(board) {
            ghost.y += 1;
        }
        ghost.y
    }

    /// Drop the piece as far as it goes, awarding the drop bonus per row.
    /// Returns the number of rows descended. Does not lock.
    pub fn hard_drop(&mut self, board: &Board, progression: &mut Progression) -> u32 {
        let mut rows = 0;
        while self.try_move(board, 0, 1) {
            rows += 1;
        }
        progression.add_points(calculate_drop_score(rows));
        rows
    }

    /// Lock the piece into the board, clear lines, and replace it with the
    /// queued piece at its spawn origin.
    pub fn lock_and_advance(
        &mut self,
        spawner: &mut Spawner,
        board: &mut Board,
        progression: &mut Progression,
    ) -> Result<LockResult> {
        board.stamp(&self.shape, self.x, self.y)?;

        let score_before = progression.score();
        let lines_cleared = apply_clear(board, progression);
        let points = progression.score() - score_before;

        *self = Self::spawn(spawner.next(), board.width());

        Ok(LockResult {
            lines_cleared,
            points,
            is_game_over: self.collides(board),
        })
    }
}
