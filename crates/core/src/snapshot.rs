use crate::board::Offset;
use crate::pieces::Tetromino;
use crate::types::{Cell, GamePhase, PieceKind, Rgb, COLUMNS, ROWS};

/// Locked cells with the active piece drawn on top.
pub type DisplayGrid = [[Cell; COLUMNS as usize]; ROWS as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: usize,
    pub color: Rgb,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    pub fn new(piece: &Tetromino, offset: Offset) -> Self {
        Self {
            kind: piece.kind,
            rotation: piece.rotation(),
            color: piece.color,
            x: offset.x,
            y: offset.y,
        }
    }
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: DisplayGrid,
    pub active: Option<ActiveSnapshot>,
    pub phase: GamePhase,
    pub score: u32,
    pub game_id: u32,
    pub pieces_spawned: u32,
}

impl GameSnapshot {
    pub fn paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[Cell::EMPTY; COLUMNS as usize]; ROWS as usize],
            active: None,
            phase: GamePhase::Paused,
            score: 0,
            game_id: 0,
            pieces_spawned: 0,
        }
    }
}
