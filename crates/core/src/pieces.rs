//! Pieces module - tetromino catalog and the rotation operator
//!
//! A piece is a small rectangular matrix of cells (sparse, `None` marks filler).
//! Shapes are immutable values: [`rotate_cw`] builds a new matrix instead of
//! turning the old one in place. There is no kick table; a rotation that
//! would overlap something is rejected by the caller's collision check.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::{Cell, PieceKind};

/// Largest side of any shape matrix.
pub const MAX_SHAPE_DIM: usize = 4;

/// Filled cells of a shape as `(dx, dy, kind)` offsets from its top-left corner.
pub type Minos = ArrayVec<(i8, i8, PieceKind), { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// Immutable piece matrix of `height` rows by `width` columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    width: u8,
    height: u8,
    /// Row-major storage; only the `height x width` corner is meaningful.
    cells: [[Cell; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from rows of cells. Every row must have the same length,
    /// both sides must be `1..=MAX_SHAPE_DIM` and at least one cell is filled.
    pub fn from_rows(rows: &[&[Cell]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height > MAX_SHAPE_DIM || width == 0 || width > MAX_SHAPE_DIM {
            return None;
        }
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        if rows.iter().all(|row| row.iter().all(|cell| cell.is_none())) {
            return None;
        }

        let mut cells = [[None; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, row) in rows.iter().enumerate() {
            cells[y][..width].copy_from_slice(row);
        }
        Some(Self {
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    /// Build a shape from a 0/1 mask filled with a single kind.
    fn from_mask(kind: PieceKind, mask: &[&[u8]]) -> Self {
        let mut cells = [[None; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, row) in mask.iter().enumerate() {
            for (x, &bit) in row.iter().enumerate() {
                if bit != 0 {
                    cells[y][x] = Some(kind);
                }
            }
        }
        Self {
            width: mask[0].len() as u8,
            height: mask.len() as u8,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Cell at `(x, y)` inside the matrix, `None` outside it.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width as usize && y < self.height as usize {
            Some(self.cells[y][x])
        } else {
            None
        }
    }

    /// Iterate the matrix rows (each trimmed to `width`).
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells[..self.height as usize]
            .iter()
            .map(move |row| &row[..self.width as usize])
    }

    /// Non-empty cells with their offsets from the top-left corner.
    pub fn minos(&self) -> Minos {
        let mut out = Minos::new();
        for (y, row) in self.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(kind) = cell {
                    out.push((x as i8, y as i8, *kind));
                }
            }
        }
        out
    }

    /// Kind of the first filled cell (canonical shapes have a single kind).
    pub fn kind(&self) -> Option<PieceKind> {
        self.rows().flatten().find_map(|cell| *cell)
    }

    /// Rotated copy; see [`rotate_cw`].
    pub fn rotated_cw(&self) -> Self {
        rotate_cw(self)
    }
}

/// Rotate a shape 90° clockwise.
///
/// For an R×C source the result is C×R with `result[x][R-1-y] = source[y][x]`.
pub fn rotate_cw(shape: &Shape) -> Shape {
    let rows = shape.height as usize;
    let cols = shape.width as usize;
    let mut cells = [[None; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

    for y in 0..rows {
        for x in 0..cols {
            cells[x][rows - 1 - y] = shape.cells[y][x];
        }
    }

    Shape {
        width: shape.height,
        height: shape.width,
        cells,
    }
}

/// Number of catalog shapes.
pub fn shapes_count() -> usize {
    PieceKind::ALL.len()
}

/// Canonical shape at a catalog index (`0..shapes_count()`).
pub fn shape_at(index: usize) -> Option<Shape> {
    PieceKind::from_index(index).map(spawn_shape)
}

/// Canonical spawn orientation for a piece kind.
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_mask(kind, &[&[1, 1, 1, 1]]),
        PieceKind::J => Shape::from_mask(kind, &[&[1, 0, 0], &[1, 1, 1]]),
        PieceKind::L => Shape::from_mask(kind, &[&[0, 0, 1], &[1, 1, 1]]),
        PieceKind::O => Shape::from_mask(kind, &[&[1, 1], &[1, 1]]),
        PieceKind::S => Shape::from_mask(kind, &[&[0, 1, 1], &[1, 1, 0]]),
        PieceKind::T => Shape::from_mask(kind, &[&[0, 1, 0], &[1, 1, 1]]),
        PieceKind::Z => Shape::from_mask(kind, &[&[1, 1, 0], &[0, 1, 1]]),
    }
}
