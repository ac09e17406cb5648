//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or filled with a piece
//! kind. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) with x in 0..9 left to right, y in 0..19 top to bottom.
//! Rows above the top (negative y) are open space so pieces may sit partially
//! above the visible board.

use crate::core::pieces::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// A swept (removed) row: its former index plus the cells it held, kept so
/// the shatter animation can be seeded after the one-time removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweptRow {
    pub index: usize,
    pub cells: [Cell; BOARD_WIDTH as usize],
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH || y < 0 || y >= BOARD_HEIGHT {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> i32 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> i32 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y). Returns None if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Collision test for a piece at its current position.
    ///
    /// A filled piece cell collides if it is outside the horizontal bounds,
    /// below the bottom, or on an occupied board cell. Cells above the top
    /// never collide.
    pub fn collides(&self, piece: &Piece) -> bool {
        for (x, y) in piece.board_cells() {
            if x < 0 || x >= BOARD_WIDTH {
                return true;
            }
            if y >= BOARD_HEIGHT {
                return true;
            }
            if y < 0 {
                continue;
            }
            if self.cells[(y as usize) * (BOARD_WIDTH as usize) + (x as usize)].is_some() {
                return true;
            }
        }
        false
    }

    /// Lock a piece: write every filled cell's kind into the board.
    /// Cells above the top are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        let kind = piece.kind();
        for (x, y) in piece.board_cells() {
            if y >= 0 {
                self.set(x, y, Some(kind));
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove the lowest fully-occupied row, if any.
    ///
    /// Scans bottom to top; the first full row is removed, everything above
    /// shifts down one, and an empty row enters at the top. At most one row
    /// per call; callers re-invoke to catch multi-row clears.
    pub fn sweep_one(&mut self) -> Option<SweptRow> {
        let width = BOARD_WIDTH as usize;

        for y in (0..BOARD_HEIGHT as usize).rev() {
            if !self.is_row_full(y) {
                continue;
            }

            let mut removed = [None; BOARD_WIDTH as usize];
            let start = y * width;
            removed.copy_from_slice(&self.cells[start..start + width]);

            // Shift rows above down by one; copy_within handles overlap.
            for row in (1..=y).rev() {
                let src_start = (row - 1) * width;
                let dst_start = row * width;
                self.cells
                    .copy_within(src_start..src_start + width, dst_start);
            }
            for cell in &mut self.cells[..width] {
                *cell = None;
            }

            return Some(SweptRow {
                index: y,
                cells: removed,
            });
        }

        None
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
