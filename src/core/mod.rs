//! Core game logic: board, pieces, RNG, scoring, shatter animation, and the
//! game state machine. Everything here is pure and display-agnostic.

pub mod board;
pub mod game;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod shatter;

pub use board::{Board, SweptRow};
pub use game::Game;
pub use pieces::{catalog, rotate_with_kick, Piece, Shape};
pub use rng::SimpleRng;
pub use scoring::drop_interval_ms;
pub use shatter::{Particle, ShatterBatch};
