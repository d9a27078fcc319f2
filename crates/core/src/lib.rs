//! Core game logic - pure, deterministic, and testable
//!
//! Rules, state and timing for the falling-block game. Nothing in here touches
//! the terminal or the wall clock: the front end feeds elapsed milliseconds to
//! [`GameState::tick`] and player input to the move/rotate/pause methods, then
//! reads back a [`GameSnapshot`] and drains [`GameEvent`](types::GameEvent)s.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of locked cells, full-row detection and compaction
//! - [`pieces`]: the seven shape kinds and their rotation cycles
//! - [`rng`]: random sources and the uniform piece spawner
//! - [`scheduler`]: drop, lock-grace and clear-animation timers
//! - [`game_state`]: the engine tying it all together
//! - [`scoring`]: points per cleared row
//! - [`config`]: timing/scoring configuration loaded from TOML
//! - [`events`]: listener hooks for score, new game and game over
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use block_drop_core::GameState;
//! use block_drop_core::types::{GameAction, GamePhase};
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.phase(), GamePhase::Paused);
//!
//! game.apply_action(GameAction::TogglePause);
//! game.apply_action(GameAction::MoveRight);
//! game.tick(300);
//!
//! assert_eq!(game.offset().y, 1);
//! ```

pub mod board;
pub mod config;
pub mod events;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use block_drop_types as types;

pub use board::{Grid, Offset, RowList};
pub use config::{ConfigError, GameConfig, CONFIG_ENV_VAR};
pub use events::{dispatch, GameListener};
pub use game_state::GameState;
pub use pieces::{get_shape, rotation_states, Point, Tetromino};
pub use rng::{spawn_piece, RandomSource, SimpleRng};
pub use scheduler::{Scheduler, TimerKind};
pub use scoring::row_clear_score;
pub use snapshot::{ActiveSnapshot, DisplayGrid, GameSnapshot};
