//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, the terminal view and the input mapping alike.
//!
//! # Board Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Spawn offset**: (`COLUMNS / 2 - 1`, 0)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame/tick cadence of the terminal loop |
//! | `DROP_INTERVAL_MS` | 300 | Period of the gravity timer |
//! | `LOCK_GRACE_MS` | 300 | Grace window before a blocked piece locks |
//! | `CLEAR_ANIMATION_MS` | 500 | Full rows stay highlighted this long |
//!
//! # Examples
//!
//! ```
//! use block_drop_types::{PieceKind, COLUMNS, ROWS, SPAWN_X};
//!
//! assert_eq!(PieceKind::from_index(2), Some(PieceKind::I));
//! assert_eq!(PieceKind::T.as_str(), "t");
//!
//! assert_eq!(COLUMNS, 10);
//! assert_eq!(ROWS, 20);
//! assert_eq!(SPAWN_X, 4);
//! ```

/// Board width in cells (10 columns)
pub const COLUMNS: u8 = 10;

/// Board height in cells (20 rows)
pub const ROWS: u8 = 20;

/// Horizontal spawn offset: centered, `floor(COLUMNS / 2) - 1`
pub const SPAWN_X: i8 = (COLUMNS / 2) as i8 - 1;

/// Vertical spawn offset
pub const SPAWN_Y: i8 = 0;

/// A lock that leaves any taken cell in this row ends the game.
pub const GAME_OVER_ROW: u8 = 1;

/// Terminal loop cadence (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity period: the piece falls one row per interval.
pub const DROP_INTERVAL_MS: u32 = 300;

/// Delay between a piece becoming blocked and it being locked.
pub const LOCK_GRACE_MS: u32 = 300;

/// How long cleared rows stay highlighted before they are removed.
pub const CLEAR_ANIMATION_MS: u32 = 500;

/// Points awarded per cleared cell.
pub const PER_SQUARE_SCORE: u32 = 1;

/// 24-bit RGB color tag carried by every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    ///
    /// ```
    /// use block_drop_types::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex(0xd81c38), Rgb::new(0xd8, 0x1c, 0x38));
    /// ```
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

/// Color of an untaken cell.
pub const EMPTY_COLOR: Rgb = Rgb::from_hex(0xeaeaea);

/// Highlight applied to full rows during the clear animation.
pub const CLEARING_COLOR: Rgb = Rgb::from_hex(0xd81c38);

/// Piece colors. Each spawned piece picks one uniformly.
pub const PALETTE: [Rgb; 17] = [
    Rgb::from_hex(0xffd300),
    Rgb::from_hex(0xde38c8),
    Rgb::from_hex(0x652ec7),
    Rgb::from_hex(0x33135c),
    Rgb::from_hex(0x13ca91),
    Rgb::from_hex(0xff9472),
    Rgb::from_hex(0x35212a),
    Rgb::from_hex(0xff8b8b),
    Rgb::from_hex(0x28cf75),
    Rgb::from_hex(0x00a9fe),
    Rgb::from_hex(0x04005e),
    Rgb::from_hex(0x120052),
    Rgb::from_hex(0x272822),
    Rgb::from_hex(0xf92672),
    Rgb::from_hex(0x66d9ef),
    Rgb::from_hex(0xa6e22e),
    Rgb::from_hex(0xfd971f),
];

/// A cell on the game board
///
/// Locked cells are `taken` and carry the color of the piece that filled them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub taken: bool,
    pub color: Rgb,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        taken: false,
        color: EMPTY_COLOR,
    };

    pub const fn filled(color: Rgb) -> Self {
        Self { taken: true, color }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// The seven tetromino shape kinds, in catalog order.
///
/// Spawning draws a catalog index in `1..=7`:
/// 1 **O**, 2 **I**, 3 **L**, 4 **J**, 5 **Z**, 6 **S**, 7 **T**.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    L,
    J,
    Z,
    S,
    T,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
    ];

    /// Map a 1-based catalog index to a kind
    ///
    /// # Examples
    ///
    /// ```
    /// use block_drop_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(1), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_index(7), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_index(0), None);
    /// ```
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            1..=7 => Some(Self::ALL[(index - 1) as usize]),
            _ => None,
        }
    }

    /// Lowercase name used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::I => "i",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::T => "t",
        }
    }
}

/// Game actions pushed into the engine by a front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    MoveDown,
    /// Advance to the next rotation state
    Rotate,
    /// Pause if running, resume if paused
    TogglePause,
    /// Start a new game (paused, empty board, score 0)
    Reset,
}

/// Coarse engine phase. Exactly one holds at a time.
///
/// Only `Running` accepts gameplay input. `Locking` and `GameOver` are passed
/// through within a single engine step; observers see them as
/// [`GameEvent::PieceLocked`] and [`GameEvent::GameOver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Paused,
    Running,
    Locking,
    Clearing,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Paused => "paused",
            GamePhase::Running => "running",
            GamePhase::Locking => "locking",
            GamePhase::Clearing => "clearing",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Notifications the engine emits for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Board and score were reset; the new game starts paused.
    NewGame,
    /// Score changed to the carried value.
    ScoreChanged(u32),
    /// A lock reached the game-over row; a new game follows immediately.
    GameOver { score: u32 },
    /// The active piece was committed into the grid.
    PieceLocked,
    /// Highlighted rows were removed and the grid compacted.
    RowsCleared { count: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(DROP_INTERVAL_MS, 300);
        assert_eq!(LOCK_GRACE_MS, 300);
        assert_eq!(CLEAR_ANIMATION_MS, 500);
        assert_eq!(PER_SQUARE_SCORE, 1);
    }

    #[test]
    fn spawn_is_centered() {
        assert_eq!(SPAWN_X, 4);
        assert_eq!(SPAWN_Y, 0);
    }

    #[test]
    fn piece_kind_round_trips_through_catalog_index() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(PieceKind::from_index(i as u32 + 1), Some(*kind));
            assert_eq!(kind.as_str().len(), 1);
        }
        assert_eq!(PieceKind::from_index(8), None);
    }

    #[test]
    fn empty_cell_is_default() {
        let cell = Cell::default();
        assert!(!cell.taken);
        assert_eq!(cell.color, EMPTY_COLOR);
        assert!(Cell::filled(PALETTE[0]).taken);
    }
}
