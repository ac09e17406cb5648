//! Per-piece sprite definitions: one color per piece kind, shared by locked
//! cells, the falling piece, and the particles shattered off a cleared row.

use crate::term::fb::Rgb;
use crate::types::PieceKind;

/// Visual identity for one piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub color: Rgb,
}

/// The complete sprite table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSet {
    sprites: [Sprite; 7],
}

impl SpriteSet {
    /// The built-in palette.
    pub fn builtin() -> Self {
        let color = |r, g, b| Sprite {
            color: Rgb::new(r, g, b),
        };
        // Indexed by PieceKind::tag() - 1.
        Self {
            sprites: [
                color(200, 120, 220), // T
                color(240, 220, 80),  // O
                color(255, 165, 0),   // L
                color(80, 120, 220),  // J
                color(80, 220, 220),  // I
                color(100, 220, 120), // S
                color(220, 80, 80),   // Z
            ],
        }
    }

    pub fn sprite(&self, kind: PieceKind) -> Sprite {
        self.sprites[(kind.tag() - 1) as usize]
    }
}

impl Default for SpriteSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PIECE_KINDS;

    #[test]
    fn every_kind_has_a_distinct_color() {
        let set = SpriteSet::builtin();
        for (i, a) in PIECE_KINDS.iter().enumerate() {
            for b in &PIECE_KINDS[i + 1..] {
                assert_ne!(set.sprite(*a).color, set.sprite(*b).color);
            }
        }
    }
}
