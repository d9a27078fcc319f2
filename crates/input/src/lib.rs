//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`InputCommand`]s. Gameplay keys become
//! [`GameAction`](types::GameAction)s for the engine; the rest drive dialogs and
//! the application loop. The map is stateless: whether a command is honored
//! depends on the current dialog and game phase, which the caller owns.

pub mod map;

pub use block_drop_types as types;

pub use map::{map_key, should_quit, InputCommand};
