//! Shattris - a terminal falling-block game with shattering row clears
//!
//! Cleared rows burst into drifting, shrinking particles before play
//! resumes. Gravity accelerates with the score, pause and restart are a
//! keypress away, and the high score survives across runs.
//!
//! The crate splits into a pure core ([`core`]) that knows nothing about
//! terminals, a frame-loop driver ([`driver`]) that turns wall-clock time
//! into game ticks, and the terminal binding ([`term`], [`input`],
//! [`render`]) that does.

pub mod core;
pub mod driver;
pub mod input;
pub mod render;
pub mod score_store;
pub mod sprites;
pub mod term;
pub mod types;
