//! Block Drop (workspace facade crate).
//!
//! Re-exports the workspace crates as `block_drop::{core,input,term,types}` and
//! hosts the [`App`] that wires engine events to terminal dialogs, plus the
//! [`TickClock`] that paces the terminal loop.

pub mod app;
pub mod clock;

pub use block_drop_core as core;
pub use block_drop_input as input;
pub use block_drop_term as term;
pub use block_drop_types as types;

pub use app::{App, Dialog};
pub use clock::TickClock;
