//! TermView: renders game frames into a terminal framebuffer.
//!
//! Pure (no I/O), so frame composition is unit-testable. Each board cell
//! takes two terminal columns to compensate for glyph aspect ratio. The view
//! implements [`DrawSurface`], so [`draw_frame`] drives the playfield;
//! the HUD and overlays are drawn on top afterwards.

use crate::core::Game;
use crate::render::{draw_frame, DrawSurface};
use crate::sprites::SpriteSet;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Board cell width in terminal columns.
const CELL_W: u16 = 2;
/// Playfield frame size including the border.
const FRAME_W: u16 = BOARD_WIDTH as u16 * CELL_W + 2;
const FRAME_H: u16 = BOARD_HEIGHT as u16 + 2;

pub struct TermView {
    fb: FrameBuffer,
    sprites: SpriteSet,
}

impl TermView {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            fb: FrameBuffer::new(width, height),
            sprites: SpriteSet::builtin(),
        }
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.fb.resize(width, height);
    }

    /// Compose one frame and return the framebuffer for flushing.
    pub fn compose(&mut self, game: &Game) -> &mut FrameBuffer {
        draw_frame(game, self);
        self.draw_hud(game);
        self.draw_overlays(game);
        &mut self.fb
    }

    /// Top-left of the playfield frame, centered in the viewport.
    fn origin(&self) -> (u16, u16) {
        (
            self.fb.width().saturating_sub(FRAME_W) / 2,
            self.fb.height().saturating_sub(FRAME_H) / 2,
        )
    }

    fn field_style() -> CellStyle {
        CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(20, 20, 28),
            bold: false,
            dim: false,
        }
    }

    fn draw_border(&mut self) {
        let (ox, oy) = self.origin();
        let style = CellStyle {
            fg: Rgb::new(200, 200, 200),
            ..CellStyle::default()
        };

        self.fb.put_char(ox, oy, '┌', style);
        self.fb.put_char(ox + FRAME_W - 1, oy, '┐', style);
        self.fb.put_char(ox, oy + FRAME_H - 1, '└', style);
        self.fb.put_char(ox + FRAME_W - 1, oy + FRAME_H - 1, '┘', style);
        for dx in 1..FRAME_W - 1 {
            self.fb.put_char(ox + dx, oy, '─', style);
            self.fb.put_char(ox + dx, oy + FRAME_H - 1, '─', style);
        }
        for dy in 1..FRAME_H - 1 {
            self.fb.put_char(ox, oy + dy, '│', style);
            self.fb.put_char(ox + FRAME_W - 1, oy + dy, '│', style);
        }
    }

    /// Glyph weight for a sprite size in board-cell units.
    fn glyph_for_size(size: f32) -> char {
        if size >= 0.75 {
            '█'
        } else if size >= 0.45 {
            '▓'
        } else if size >= 0.25 {
            '▒'
        } else {
            '░'
        }
    }

    fn draw_hud(&mut self, game: &Game) {
        let (ox, oy) = self.origin();
        let panel_x = ox + FRAME_W + 2;
        if panel_x + 10 > self.fb.width() {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::default();
        let hint = CellStyle {
            dim: true,
            ..CellStyle::default()
        };

        let mut y = oy + 1;
        self.fb.put_str(panel_x, y, "SCORE", label);
        self.fb
            .put_str(panel_x, y + 1, &game.score().to_string(), value);
        y += 3;
        self.fb.put_str(panel_x, y, "HIGH", label);
        self.fb
            .put_str(panel_x, y + 1, &game.high_score().to_string(), value);
        y += 3;

        for line in [
            "←/→  move",
            "↑    rotate",
            "↓    drop",
            "p    pause",
            "r    restart",
            "q    quit",
        ] {
            self.fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    fn draw_overlays(&mut self, game: &Game) {
        if game.game_over() {
            self.draw_banner("GAME OVER", 0);
            self.draw_banner("press r to restart", 2);
        } else if game.paused() {
            self.draw_banner("PAUSED", 0);
        }
    }

    fn draw_banner(&mut self, text: &str, row_offset: u16) {
        let (ox, oy) = self.origin();
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bold: true,
            ..CellStyle::default()
        };
        let w = text.chars().count() as u16;
        let x = ox + (FRAME_W.saturating_sub(w)) / 2;
        let y = oy + FRAME_H / 2 + row_offset;
        self.fb.put_str(x, y, text, style);
    }
}

impl DrawSurface for TermView {
    fn clear(&mut self) {
        self.fb.fill(CellStyle::default().blank());
        let (ox, oy) = self.origin();
        self.fb.fill_rect(
            ox + 1,
            oy + 1,
            FRAME_W - 2,
            FRAME_H - 2,
            ' ',
            Self::field_style(),
        );
        self.draw_border();
    }

    fn paint_sprite(&mut self, kind: PieceKind, x: f32, y: f32, size: f32) {
        let (ox, oy) = self.origin();
        let style = CellStyle {
            fg: self.sprites.sprite(kind).color,
            bg: Self::field_style().bg,
            bold: size >= 0.75,
            dim: size < 0.15,
        };
        let glyph = Self::glyph_for_size(size);

        if size >= 1.0 {
            // Full board cell: both terminal columns.
            let px = ox + 1 + (x as u16) * CELL_W;
            let py = oy + 1 + y as u16;
            self.fb.fill_rect(px, py, CELL_W, 1, glyph, style);
            return;
        }

        // Particle: clip to the play area so sparks never cross the border.
        let col = (x * CELL_W as f32).floor();
        let row = y.floor();
        if !(0.0..(BOARD_WIDTH * CELL_W as i32) as f32).contains(&col)
            || !(0.0..BOARD_HEIGHT as f32).contains(&row)
        {
            return;
        }
        self.fb
            .put_char(ox + 1 + col as u16, oy + 1 + row as u16, glyph, style);
    }
}
