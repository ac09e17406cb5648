//! Pieces module - tetromino catalog and matrix rotation
//!
//! Shapes are small square cell matrices, rotated in place by transposing
//! and then reversing rows (clockwise) or the row order (counter-clockwise).
//! Wall kicks nudge the piece horizontally through an oscillating offset
//! sequence until the rotation fits or the search gives up and reverts.

use crate::types::{Cell, PieceKind, Spin, BOARD_WIDTH, PIECE_KINDS};

/// Backing matrix edge; the largest catalog shape (I) is 4x4.
const MAX_SHAPE: usize = 4;

/// A piece shape: an n x n cell matrix (n = 2, 3 or 4) whose nonzero cells
/// all carry the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    kind: PieceKind,
    size: usize,
    cells: [[Cell; MAX_SHAPE]; MAX_SHAPE],
}

impl Shape {
    fn from_pattern(kind: PieceKind, rows: &[&[u8]]) -> Self {
        let size = rows.len();
        debug_assert!(size >= 2 && size <= MAX_SHAPE);
        debug_assert!(rows.iter().all(|r| r.len() == size), "shape must be square");

        let mut cells = [[None; MAX_SHAPE]; MAX_SHAPE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                if v != 0 {
                    cells[y][x] = Some(kind);
                }
            }
        }
        Self { kind, size, cells }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Matrix edge length (also the shape's width, used as the kick bound).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at local matrix coordinates.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.cells[y][x]
    }

    /// Local offsets of every filled cell, row-major.
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32)> {
        let cells = self.cells;
        let size = self.size;
        (0..size).flat_map(move |y| {
            (0..size).filter_map(move |x| cells[y][x].map(|_| (x as i32, y as i32)))
        })
    }

    /// Rotate 90 degrees in place: transpose, then reverse each row (cw)
    /// or reverse the row order (ccw).
    pub fn rotate(&mut self, spin: Spin) {
        let n = self.size;
        for y in 0..n {
            for x in 0..y {
                let tmp = self.cells[y][x];
                self.cells[y][x] = self.cells[x][y];
                self.cells[x][y] = tmp;
            }
        }
        match spin {
            Spin::Cw => {
                for row in self.cells.iter_mut().take(n) {
                    row[..n].reverse();
                }
            }
            Spin::Ccw => {
                self.cells[..n].reverse();
            }
        }
    }
}

/// Catalog template for a piece kind (the original's matrices).
pub fn shape_for(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::T => Shape::from_pattern(kind, &[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]]),
        PieceKind::O => Shape::from_pattern(kind, &[&[1, 1], &[1, 1]]),
        PieceKind::L => Shape::from_pattern(kind, &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::J => Shape::from_pattern(kind, &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::I => Shape::from_pattern(
            kind,
            &[&[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0]],
        ),
        PieceKind::S => Shape::from_pattern(kind, &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
        PieceKind::Z => Shape::from_pattern(kind, &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
    }
}

/// The active falling piece: a shape copy plus its board-coordinate offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Fresh piece at the spawn position: horizontally centered by integer
    /// division, top row 0.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = shape_for(kind);
        let x = BOARD_WIDTH / 2 - shape.size() as i32 / 2;
        Self { shape, x, y: 0 }
    }

    /// Board coordinates of every filled cell.
    pub fn board_cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (px, py) = (self.x, self.y);
        self.shape.filled().map(move |(dx, dy)| (px + dx, py + dy))
    }

    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }
}

/// Rotate with wall-kick search.
///
/// After the in-place rotation, while the piece collides, `x` is shifted by
/// the cumulative offsets +1, -2, +3, -4, ... (net positions +1, -1, +2, -2,
/// ...). If the offset grows past the shape's width the whole attempt is
/// reverted: original rotation and position, no partial state.
///
/// Returns true if the piece ends up rotated.
pub fn rotate_with_kick(piece: &mut Piece, spin: Spin, collides: impl Fn(&Piece) -> bool) -> bool {
    let original_x = piece.x;
    let mut offset: i32 = 1;

    piece.shape.rotate(spin);
    while collides(piece) {
        piece.x += offset;
        offset = -(offset + if offset > 0 { 1 } else { -1 });
        if offset > piece.shape.size() as i32 {
            piece.shape.rotate(spin.opposite());
            piece.x = original_x;
            return false;
        }
    }
    true
}

/// All catalog kinds (re-exported for spawn selection).
pub fn catalog() -> [PieceKind; 7] {
    PIECE_KINDS
}
