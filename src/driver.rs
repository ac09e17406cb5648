//! Frame loop driver: turns wall-clock timestamps into game ticks.
//!
//! The host calls [`FrameLoop::frame`] once per frame with a monotonic
//! millisecond clock. The loop measures the delta itself, so hosts with
//! irregular frame pacing still get correct gravity. When the game stops
//! wanting frames (pause, game over) the loop reports [`TickRequest::Idle`]
//! and forgets its last timestamp, so the dead time never reaches the game
//! as one giant delta on resume.

use crate::core::Game;

/// What the host should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickRequest {
    /// Keep scheduling frames at the usual cadence.
    Continue,
    /// Stop scheduling frames; wait for input and call `frame` again after
    /// the state changes.
    Idle,
}

/// Measures per-frame elapsed time and drives [`Game::tick`].
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    last_time_ms: Option<u64>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame at `now_ms`. The first frame after construction,
    /// [`interrupt`](Self::interrupt), or an idle period sees a zero delta.
    pub fn frame(&mut self, game: &mut Game, now_ms: u64) -> TickRequest {
        let elapsed = match self.last_time_ms {
            Some(last) => now_ms.saturating_sub(last).min(u32::MAX as u64) as u32,
            None => 0,
        };
        self.last_time_ms = Some(now_ms);

        game.tick(elapsed);

        if game.wants_frames() {
            TickRequest::Continue
        } else {
            self.last_time_ms = None;
            TickRequest::Idle
        }
    }

    /// Drop the timing baseline, e.g. when the host blocked on input.
    pub fn interrupt(&mut self) {
        self.last_time_ms = None;
    }
}
