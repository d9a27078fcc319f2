//! Game state module - the engine
//!
//! Ties together the grid, the active piece, the scheduler and the RNG.
//! All mutation goes through `&mut self`: input methods and [`GameState::tick`].
//! Timer callbacks are popped from the scheduler one at a time, so input can never
//! interleave with a half-finished lock or clear.
//!
//! Drop/lock cycle:
//!
//! ```text
//! Falling --blocked--> LockPending --grace fires, still blocked--> Locking
//!    ^                      |                                          |
//!    +------can fall--------+                   row 1 taken? --> GameOver -> new game
//!                                                                      |
//!                                       full rows? --> Clearing --animation--> spawn
//!                                                                      |
//!                                                                      +--> spawn
//! ```

use log::{debug, info};

use crate::board::{Grid, Offset, RowList};
use crate::config::GameConfig;
use crate::events::{self, GameListener};
use crate::pieces::{Point, Tetromino};
use crate::rng::{spawn_piece, RandomSource, SimpleRng};
use crate::scheduler::{Scheduler, TimerKind};
use crate::scoring::row_clear_score;
use crate::snapshot::{ActiveSnapshot, DisplayGrid, GameSnapshot};
use crate::types::{
    Cell, GameAction, GameEvent, GamePhase, CLEARING_COLOR, COLUMNS, GAME_OVER_ROW, ROWS,
    SPAWN_X, SPAWN_Y,
};

const SPAWN_OFFSET: Offset = Offset::new(SPAWN_X, SPAWN_Y);

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    config: GameConfig,
    grid: Grid,
    active: Option<Tetromino>,
    offset: Offset,
    score: u32,
    phase: GamePhase,
    /// Phase restored by `resume`.
    resume_phase: GamePhase,
    /// Rows highlighted while the clear animation runs.
    clearing_rows: RowList,
    scheduler: Scheduler,
    rng: R,
    events: Vec<GameEvent>,
    /// Incremented on every new game.
    game_id: u32,
    pieces_spawned: u32,
}

impl GameState<SimpleRng> {
    /// Create a paused game with default timings and a seeded RNG
    pub fn new(seed: u32) -> Self {
        Self::with_rng(GameConfig::default(), SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a paused game with the first piece already at the spawn offset
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let mut state = Self {
            config,
            grid: Grid::new(),
            active: None,
            offset: SPAWN_OFFSET,
            score: 0,
            phase: GamePhase::Paused,
            resume_phase: GamePhase::Running,
            clearing_rows: RowList::new(),
            scheduler: Scheduler::new(),
            rng,
            events: Vec::new(),
            game_id: 0,
            pieces_spawned: 0,
        };
        state.reset();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Tetromino> {
        self.active.as_ref()
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Gameplay input (move/rotate) is only honored while running.
    pub fn can_accept_input(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Rows currently highlighted by the clear animation
    pub fn clearing_rows(&self) -> &[usize] {
        &self.clearing_rows
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    // ---- input -------------------------------------------------------------

    pub fn move_left(&mut self) -> bool {
        self.player_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.player_move(1, 0)
    }

    pub fn move_down(&mut self) -> bool {
        self.player_move(0, 1)
    }

    /// Advance to the next rotation state if every cell of it fits.
    ///
    /// A blocked rotation leaves the rotation index untouched. Pieces with a
    /// single rotation state report `false`.
    pub fn rotate(&mut self) -> bool {
        if !self.can_accept_input() {
            return false;
        }
        self.try_rotate()
    }

    /// Pause gameplay. Accepted in any phase other than `Paused`.
    ///
    /// Gravity is cancelled; a pending lock grace or clear animation keeps its
    /// remaining time and continues after `resume`.
    pub fn pause(&mut self) -> bool {
        if self.phase == GamePhase::Paused {
            return false;
        }
        self.resume_phase = self.phase;
        self.phase = GamePhase::Paused;
        self.scheduler.cancel(TimerKind::Drop);
        debug!("paused during {}", self.resume_phase.as_str());
        true
    }

    /// Resume the interrupted phase and restart gravity with a full period.
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = self.resume_phase;
        self.resume_phase = GamePhase::Running;
        self.scheduler
            .start_periodic(TimerKind::Drop, self.config.drop_interval_ms);
        debug!("resumed into {}", self.phase.as_str());
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.is_paused() {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Start a new game: empty grid, score 0, fresh piece at spawn, paused.
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.grid.clear();
        self.clearing_rows.clear();
        self.score = 0;
        self.phase = GamePhase::Paused;
        self.resume_phase = GamePhase::Running;
        self.game_id = self.game_id.wrapping_add(1);
        self.spawn_next();

        info!("new game #{}", self.game_id);
        self.events.push(GameEvent::NewGame);
        self.events.push(GameEvent::ScoreChanged(self.score));
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::Rotate => self.rotate(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    // ---- time --------------------------------------------------------------

    /// Advance the game clock, running every timer callback that falls due.
    ///
    /// Returns true if any callback ran. Nothing advances while paused.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase == GamePhase::Paused {
            return false;
        }

        let mut budget = elapsed_ms;
        let mut fired = false;
        while let Some(kind) = self.scheduler.pop_due(&mut budget) {
            fired = true;
            match kind {
                TimerKind::Drop => self.on_drop_tick(),
                TimerKind::LockGrace => self.on_lock_grace(),
                TimerKind::ClearAnimation => self.on_clear_finished(),
            }
            // A game over restarts paused; the rest of the budget belongs to nobody.
            if self.phase == GamePhase::Paused {
                break;
            }
        }
        fired
    }

    fn on_drop_tick(&mut self) {
        if self.phase != GamePhase::Running || self.active.is_none() {
            return;
        }

        if self.try_move(0, 1) {
            if self.scheduler.is_armed(TimerKind::LockGrace) {
                self.scheduler.cancel(TimerKind::LockGrace);
                debug!("lock grace cancelled, piece falling again");
            }
        } else if !self.scheduler.is_armed(TimerKind::LockGrace) {
            self.scheduler
                .start_once(TimerKind::LockGrace, self.config.lock_grace_ms);
            debug!("piece blocked at {:?}, lock grace armed", self.offset);
        }
    }

    fn on_lock_grace(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        if self.can_move(0, 1) {
            debug!("piece rescued during lock grace");
            return;
        }
        self.lock_active();
    }

    fn on_clear_finished(&mut self) {
        if self.phase != GamePhase::Clearing {
            return;
        }

        let rows = std::mem::take(&mut self.clearing_rows);
        self.grid.clear_rows(&rows);
        self.grid.compact_after_clear(&rows);
        self.events.push(GameEvent::RowsCleared {
            count: rows.len() as u32,
        });
        debug!("cleared rows {:?}", rows.as_slice());

        self.spawn_next();
        self.phase = GamePhase::Running;
    }

    // ---- lock / clear / spawn ----------------------------------------------

    /// Commit the active piece into the grid, then decide what follows.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.phase = GamePhase::Locking;
        self.grid.lock(&piece.points(), self.offset);
        self.offset = SPAWN_OFFSET;
        self.events.push(GameEvent::PieceLocked);
        debug!("locked {} piece", piece.kind.as_str());

        if self.grid.row_has_taken(GAME_OVER_ROW as usize) {
            self.game_over();
            return;
        }
        self.check_rows();
    }

    fn check_rows(&mut self) {
        let rows = self.grid.full_rows();
        if rows.is_empty() {
            self.spawn_next();
            self.phase = GamePhase::Running;
            return;
        }

        self.score = self.score.saturating_add(row_clear_score(
            rows.len(),
            self.config.per_square_score,
        ));
        self.events.push(GameEvent::ScoreChanged(self.score));
        info!("{} full row(s), score {}", rows.len(), self.score);

        self.grid.mark_rows(&rows, CLEARING_COLOR);
        self.clearing_rows = rows;
        self.phase = GamePhase::Clearing;
        self.scheduler.cancel(TimerKind::LockGrace);
        self.scheduler
            .start_once(TimerKind::ClearAnimation, self.config.clear_animation_ms);
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.scheduler.cancel_all();
        info!("game over with score {}", self.score);
        self.events.push(GameEvent::GameOver { score: self.score });
        self.reset();
    }

    fn spawn_next(&mut self) {
        let piece = spawn_piece(&mut self.rng);
        debug!("spawned {} piece", piece.kind.as_str());
        self.active = Some(piece);
        self.offset = SPAWN_OFFSET;
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
    }

    // ---- collision ---------------------------------------------------------

    /// Absolute cells of the active piece
    pub fn active_cells(&self) -> Option<[(i8, i8); 4]> {
        let piece = self.active.as_ref()?;
        Some(piece.points().map(|p| (p.x + self.offset.x, p.y + self.offset.y)))
    }

    /// A translated candidate cell is valid when it is inside the grid and
    /// either empty or already one of the piece's own cells.
    pub fn is_valid_point(&self, candidate: (i8, i8), own_cells: &[(i8, i8)]) -> bool {
        let (x, y) = candidate;
        let free = self.grid.is_empty(x, y) || own_cells.contains(&candidate);
        free && Grid::in_bounds(x, y)
    }

    /// All-or-nothing check of `points` shifted by the offset plus `(dx, dy)`.
    fn fits(&self, points: &[Point; 4], dx: i8, dy: i8) -> bool {
        let Some(own) = self.active_cells() else {
            return false;
        };
        points.iter().all(|p| {
            let candidate = (p.x + self.offset.x + dx, p.y + self.offset.y + dy);
            self.is_valid_point(candidate, &own)
        })
    }

    /// Check if the active piece could move by `(dx, dy)`
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        match self.active {
            Some(piece) => self.fits(&piece.points(), dx, dy),
            None => false,
        }
    }

    /// Shift the active piece if it fits. Not gated on phase.
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.can_move(dx, dy) {
            return false;
        }
        self.offset.x += dx;
        self.offset.y += dy;
        true
    }

    fn try_rotate(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        if piece.rotation_count() == 1 {
            return false;
        }
        if !self.fits(&piece.next_points(), 0, 0) {
            return false;
        }
        if let Some(active) = self.active.as_mut() {
            active.advance_rotation();
        }
        true
    }

    fn player_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.can_accept_input() {
            return false;
        }
        self.try_move(dx, dy)
    }

    // ---- outputs -----------------------------------------------------------

    /// Grid with the active piece drawn on top
    pub fn display_grid(&self) -> DisplayGrid {
        let mut out = [[Cell::EMPTY; COLUMNS as usize]; ROWS as usize];
        self.write_display_grid(&mut out);
        out
    }

    fn write_display_grid(&self, out: &mut DisplayGrid) {
        for (dst, src) in out.iter_mut().zip(self.grid.rows()) {
            dst.copy_from_slice(src);
        }
        if let Some(piece) = self.active {
            for p in piece.points() {
                let x = p.x + self.offset.x;
                let y = p.y + self.offset.y;
                if Grid::in_bounds(x, y) {
                    out[y as usize][x as usize] = Cell::filled(p.color);
                }
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.write_display_grid(&mut out.grid);
        out.active = self
            .active
            .as_ref()
            .map(|piece| ActiveSnapshot::new(piece, self.offset));
        out.phase = self.phase;
        out.score = self.score;
        out.game_id = self.game_id;
        out.pieces_spawned = self.pieces_spawned;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take every event emitted since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand pending events to `listener`, oldest first
    pub fn dispatch_events<L: GameListener + ?Sized>(&mut self, listener: &mut L) {
        let pending = self.take_events();
        events::dispatch(pending, listener);
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
