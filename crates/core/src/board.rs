//! Board module - manages the game grid
//!
//! The board is a `width x height` grid (10x20 by default) where each cell can
//! be empty or filled with a piece kind. Uses a flat row-major buffer whose
//! size is fixed at creation.
//! Coordinates: (x, y) where x grows to the right and y grows downward,
//! row 0 being the top. Pieces may hang above row 0 (negative y).

use crate::error::{CoreError, Result};
use crate::pieces::Shape;
use crate::types::{cell_id, Cell, BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_DIM, MIN_BOARD_DIM};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Box<[Cell]>,
}

impl Board {
    /// Create a new empty 10x20 board
    pub fn new() -> Self {
        Self::empty(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create an empty board of the given size
    pub fn with_size(width: u8, height: u8) -> Result<Self> {
        let valid = MIN_BOARD_DIM..=MAX_BOARD_DIM;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self::empty(width, height))
    }

    fn empty(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize].into_boxed_slice(),
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32
    }

    /// Cell at position (x, y)
    pub fn get(&self, x: i32, y: i32) -> Result<Cell> {
        self.index(x, y)
            .map(|idx| self.cells[idx])
            .ok_or(CoreError::OutOfBounds { x, y })
    }

    /// Overwrite a single cell. Used to build positions in tests and tools;
    /// gameplay only adds cells through [`Board::stamp`].
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<()> {
        let idx = self.index(x, y).ok_or(CoreError::OutOfBounds { x, y })?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Whether (x, y) is filled
    pub fn is_occupied(&self, x: i32, y: i32) -> Result<bool> {
        Ok(self.get(x, y)?.is_some())
    }

    /// Whether `shape` placed with its top-left corner at the origin would
    /// leave the board sideways or through the floor, or overlap a filled cell.
    ///
    /// Cells above row 0 are only checked against the side walls.
    pub fn collides(&self, shape: &Shape, origin_x: i32, origin_y: i32) -> bool {
        shape.minos().iter().any(|&(dx, dy, _)| {
            let x = origin_x + dx as i32;
            let y = origin_y + dy as i32;
            if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return true;
            }
            y >= 0 && self.cells[y as usize * self.width as usize + x as usize].is_some()
        })
    }

    /// Write the shape's filled cells into the board.
    ///
    /// Cells above row 0 are dropped. Any other cell outside the grid is a
    /// caller bug: nothing is written and `OutOfBounds` is returned.
    pub fn stamp(&mut self, shape: &Shape, origin_x: i32, origin_y: i32) -> Result<()> {
        let minos = shape.minos();

        for &(dx, dy, _) in &minos {
            let x = origin_x + dx as i32;
            let y = origin_y + dy as i32;
            if y >= 0 && self.index(x, y).is_none() {
                return Err(CoreError::OutOfBounds { x, y });
            }
        }

        for &(dx, dy, kind) in &minos {
            let x = origin_x + dx as i32;
            let y = origin_y + dy as i32;
            if let Some(idx) = self.index(x, y) {
                self.cells[idx] = Some(kind);
            }
        }

        Ok(())
    }

    fn row(&self, y: usize) -> &[Cell] {
        let width = self.width as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height as usize && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Compacts in a single bottom-to-top pass: non-full rows are copied down
    /// to the next write slot in their original order, then the freed rows at
    /// the top are emptied. Height and width never change.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Flat row-major cell buffer
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Owned copy of the grid, one `Vec` per row (top row first)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        (0..self.height as usize).map(|y| self.row(y).to_vec()).collect()
    }

    /// Grid of numeric cell ids (0 empty, 1-7 piece kinds)
    pub fn to_id_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height as usize)
            .map(|y| self.row(y).iter().map(|&cell| cell_id(cell)).collect())
            .collect()
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
