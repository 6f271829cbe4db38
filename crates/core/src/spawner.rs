//! Piece spawner - owns the piece source and the committed next piece
//!
//! The preview shown to the player and the piece that eventually spawns are
//! the same value: the next piece is drawn once and only replaced when it is
//! handed out.

use crate::pieces::{spawn_shape, Shape};
use crate::rng::PieceSource;

#[derive(Debug)]
pub struct Spawner {
    source: Box<dyn PieceSource>,
    next: Shape,
}

impl Spawner {
    pub fn new(mut source: Box<dyn PieceSource>) -> Self {
        let next = spawn_shape(source.next_kind());
        Self { source, next }
    }

    /// Fresh shape straight from the source, bypassing the queue.
    pub fn draw(&mut self) -> Shape {
        spawn_shape(self.source.next_kind())
    }

    /// Hand out the queued piece and queue a fresh one.
    pub fn next(&mut self) -> Shape {
        let fresh = self.draw();
        std::mem::replace(&mut self.next, fresh)
    }

    /// The queued piece (preview)
    pub fn peek(&self) -> &Shape {
        &self.next
    }

    /// Redraw the queued piece (used when a game starts over).
    pub fn reset(&mut self) {
        self.next = self.draw();
    }
}

/// Spawn origin: horizontally centred, top-aligned.
///
/// `x = floor(board_width / 2) - floor(shape_width / 2)`, `y = 0`.
pub fn spawn_origin(shape: &Shape, board_width: u8) -> (i32, i32) {
    let x = (board_width / 2) as i32 - (shape.width() / 2) as i32;
    (x, 0)
}
