//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Board dimensions
pub const BOARD_WIDTH: i32 = 10;
pub const BOARD_HEIGHT: i32 = 20;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const BASE_DROP_MS: u32 = 1000;
pub const MIN_DROP_MS: u32 = 100;
/// Pause between successive single-row sweeps of a multi-row clear.
pub const SWEEP_DELAY_MS: u32 = 200;

/// Points awarded per swept row.
pub const ROW_SCORE: u32 = 10;

/// Tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,
    O,
    L,
    J,
    I,
    S,
    Z,
}

/// All piece kinds, in catalog order.
pub const PIECE_KINDS: [PieceKind; 7] = [
    PieceKind::T,
    PieceKind::J,
    PieceKind::L,
    PieceKind::O,
    PieceKind::S,
    PieceKind::Z,
    PieceKind::I,
];

impl PieceKind {
    /// Numeric cell tag (1..=7), the value the original board stored.
    pub fn tag(&self) -> u8 {
        match self {
            PieceKind::T => 1,
            PieceKind::O => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::I => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    /// Parse piece kind from its letter (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(PieceKind::T),
            "o" => Some(PieceKind::O),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "i" => Some(PieceKind::I),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "t",
            PieceKind::O => "o",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::I => "i",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;

/// Rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Cw,
    Ccw,
}

impl Spin {
    pub fn opposite(&self) -> Self {
        match self {
            Spin::Cw => Spin::Ccw,
            Spin::Ccw => Spin::Cw,
        }
    }
}

/// Discrete game commands, mapped externally from raw input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    TogglePause,
    Restart,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
            Command::TogglePause => "togglePause",
            Command::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_cover_one_through_seven() {
        let mut tags: Vec<u8> = PIECE_KINDS.iter().map(|k| k.tag()).collect();
        tags.sort_unstable();
        assert_eq!(tags, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn kind_letter_roundtrip() {
        for kind in PIECE_KINDS {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PieceKind::from_str("x"), None);
    }

    #[test]
    fn spin_opposite_is_involutive() {
        assert_eq!(Spin::Cw.opposite(), Spin::Ccw);
        assert_eq!(Spin::Ccw.opposite().opposite(), Spin::Ccw);
    }
}
