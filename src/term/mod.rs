//! Terminal binding: framebuffer, view composition, and the flusher.

pub mod fb;
pub mod renderer;
pub mod view;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::TerminalRenderer;
pub use view::TermView;
