//! Terminal "game renderer" module.
//!
//! Renders a [`GameSnapshot`](core::GameSnapshot) into a framebuffer of styled
//! glyphs and flushes it to the terminal with `crossterm`. No widget library:
//! the board is drawn cell by cell, two columns per cell to keep it square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use block_drop_core as core;
pub use block_drop_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph};
pub use game_view::{AnchorY, GameView, Overlay, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
