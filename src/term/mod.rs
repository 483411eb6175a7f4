//! Terminal front end: framebuffer, crossterm renderer, and the view glue.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::TermView;
pub use renderer::TerminalRenderer;
