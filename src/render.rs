//! Display-agnostic frame composition.
//!
//! [`draw_frame`] walks the game state in paint order (board, falling piece,
//! particles) and emits sprite paints onto any [`DrawSurface`]. Board cells
//! and piece cells paint at full size; particles carry their own shrinking
//! size so the surface can choose a lighter glyph as they fade.

use crate::core::shatter::MIN_VISIBLE_SIZE;
use crate::core::Game;
use crate::types::{PieceKind, BOARD_WIDTH};

/// Anything that can receive one frame's worth of sprite paints.
pub trait DrawSurface {
    /// Reset to an empty playfield before repainting.
    fn clear(&mut self);

    /// Paint one sprite at board coordinates. `size` is in board-cell units;
    /// locked cells and piece cells use 1.0, particles shrink below it.
    fn paint_sprite(&mut self, kind: PieceKind, x: f32, y: f32, size: f32);
}

/// Compose one frame: locked cells, then the falling piece, then particles.
pub fn draw_frame(game: &Game, surface: &mut impl DrawSurface) {
    surface.clear();

    for (i, cell) in game.board().cells().iter().enumerate() {
        if let Some(kind) = cell {
            let x = (i % BOARD_WIDTH as usize) as f32;
            let y = (i / BOARD_WIDTH as usize) as f32;
            surface.paint_sprite(*kind, x, y, 1.0);
        }
    }

    let piece = game.piece();
    for (x, y) in piece.board_cells() {
        if y >= 0 {
            surface.paint_sprite(piece.kind(), x as f32, y as f32, 1.0);
        }
    }

    for p in game.particles() {
        if p.size > MIN_VISIBLE_SIZE {
            surface.paint_sprite(p.kind, p.x, p.y, p.size);
        }
    }
}
