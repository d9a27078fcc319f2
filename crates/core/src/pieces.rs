//! Pieces module - tetromino shape catalog and rotation cycling
//!
//! Every kind owns a fixed cycle of rotation states stored as a data table.
//! Rotating advances to the next state in the cycle, wrapping to 0; there are
//! no wall kicks, the engine validates the next state at the current offset.

use crate::types::{PieceKind, Rgb};

/// Offset of a single cell relative to the piece origin
pub type CellOffset = (i8, i8);

/// One rotation state: 4 cell offsets from the piece origin
pub type PieceShape = [CellOffset; 4];

const O_STATES: &[PieceShape] = &[[(0, 0), (1, 0), (0, 1), (1, 1)]];

const I_STATES: &[PieceShape] = &[
    // horizontal
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    // vertical
    [(0, 0), (0, 1), (0, 2), (0, 3)],
];

const L_STATES: &[PieceShape] = &[
    [(0, 1), (1, 1), (2, 1), (2, 0)],
    [(0, 0), (0, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 0), (2, 0)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

const J_STATES: &[PieceShape] = &[
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(0, 0), (1, 0), (0, 1), (0, 2)],
    [(0, 0), (1, 0), (2, 0), (2, 1)],
    [(0, 2), (1, 2), (1, 1), (1, 0)],
];

const Z_STATES: &[PieceShape] = &[
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(0, 1), (1, 1), (1, 0), (0, 2)],
];

const S_STATES: &[PieceShape] = &[
    [(0, 1), (1, 1), (1, 0), (2, 0)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const T_STATES: &[PieceShape] = &[
    [(0, 1), (1, 1), (1, 0), (2, 1)],
    [(0, 0), (0, 1), (0, 2), (1, 1)],
    [(0, 0), (1, 0), (2, 0), (1, 1)],
    [(0, 1), (1, 0), (1, 1), (1, 2)],
];

/// Rotation cycle for a piece kind
pub fn rotation_states(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::O => O_STATES,
        PieceKind::I => I_STATES,
        PieceKind::L => L_STATES,
        PieceKind::J => J_STATES,
        PieceKind::Z => Z_STATES,
        PieceKind::S => S_STATES,
        PieceKind::T => T_STATES,
    }
}

/// Get the shape for a piece kind and rotation index (wraps around the cycle)
pub fn get_shape(kind: PieceKind, rotation: usize) -> PieceShape {
    let states = rotation_states(kind);
    states[rotation % states.len()]
}

/// A relative cell with the color of the piece it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i8,
    pub y: i8,
    pub color: Rgb,
}

impl Point {
    pub const fn new(x: i8, y: i8, color: Rgb) -> Self {
        Self { x, y, color }
    }
}

/// Active falling piece: shape kind, current rotation and one color.
///
/// Position is not stored here; the engine keeps the global offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    rotation: usize,
    pub color: Rgb,
}

impl Tetromino {
    /// Create a piece in its first rotation state
    pub fn new(kind: PieceKind, color: Rgb) -> Self {
        Self {
            kind,
            rotation: 0,
            color,
        }
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// Number of distinct rotation states (1, 2 or 4)
    pub fn rotation_count(&self) -> usize {
        rotation_states(self.kind).len()
    }

    /// Index the next rotation would move to
    pub fn next_rotation(&self) -> usize {
        (self.rotation + 1) % self.rotation_count()
    }

    /// Relative points of the current rotation state
    pub fn points(&self) -> [Point; 4] {
        self.points_at(self.rotation)
    }

    /// Relative points of the state `rotate` would move to
    pub fn next_points(&self) -> [Point; 4] {
        self.points_at(self.next_rotation())
    }

    /// Commit the rotation. Callers validate [`Tetromino::next_points`] first.
    pub fn advance_rotation(&mut self) {
        self.rotation = self.next_rotation();
    }

    fn points_at(&self, rotation: usize) -> [Point; 4] {
        get_shape(self.kind, rotation).map(|(x, y)| Point::new(x, y, self.color))
    }
}
