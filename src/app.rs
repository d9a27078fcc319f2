//! Application state: the engine plus whatever dialog is on screen.
//!
//! Dialog rules:
//!
//! - `Welcome` opens at startup, `GameOver` opens when the engine reports one.
//!   Any key closes either; the key is consumed.
//! - A reset request pauses the game and opens `ConfirmReset`. Confirm starts a
//!   new game; cancel closes the dialog and resumes if the request paused it.
//! - Gameplay keys are ignored while any dialog is open.

use anyhow::Result;
use log::{debug, info};

use crate::core::{dispatch, GameListener, GameSnapshot, GameState, RandomSource, SimpleRng};
use crate::input::InputCommand;
use crate::term::{FrameBuffer, GameView, Overlay, TerminalRenderer, Viewport};

const WELCOME_LINES: &[&str] = &[
    "←/→/↓ move, R rotate",
    "P pause, N new game",
    "",
    "any key, then P",
];
const GAME_OVER_LINES: &[&str] = &["try again", ""];
const CONFIRM_RESET_LINES: &[&str] = &["start a new game?", "", "Y yes   Esc no"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Welcome,
    GameOver { score: u32 },
    ConfirmReset { resume_on_cancel: bool },
}

impl Dialog {
    pub fn overlay(&self) -> Overlay<'static> {
        match *self {
            Dialog::Welcome => Overlay::new("BLOCK DROP", WELCOME_LINES),
            Dialog::GameOver { score } => {
                Overlay::new("GAME OVER", GAME_OVER_LINES).with_score(score)
            }
            Dialog::ConfirmReset { .. } => Overlay::new("RESET", CONFIRM_RESET_LINES),
        }
    }
}

pub struct App<R = SimpleRng> {
    game: GameState<R>,
    dialog: Option<Dialog>,
    quit: bool,
    snapshot: GameSnapshot,
}

impl<R: RandomSource> App<R> {
    /// Wrap a freshly created game and show the welcome dialog.
    pub fn new(game: GameState<R>) -> Self {
        let mut app = Self {
            game,
            dialog: Some(Dialog::Welcome),
            quit: false,
            snapshot: GameSnapshot::default(),
        };
        app.pump_events();
        app
    }

    pub fn game(&self) -> &GameState<R> {
        &self.game
    }

    pub fn dialog(&self) -> Option<Dialog> {
        self.dialog
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply one input command. Returns true if anything visible changed.
    pub fn handle(&mut self, command: InputCommand) -> bool {
        let changed = match (self.dialog, command) {
            (_, InputCommand::Quit) => {
                self.quit = true;
                true
            }
            (Some(Dialog::ConfirmReset { .. }), InputCommand::Confirm) => {
                self.dialog = None;
                self.game.reset();
                true
            }
            (Some(Dialog::ConfirmReset { resume_on_cancel }), InputCommand::Cancel) => {
                self.dialog = None;
                if resume_on_cancel {
                    self.game.resume();
                }
                true
            }
            (Some(Dialog::ConfirmReset { .. }), _) => false,
            (Some(dialog), _) => {
                debug!("dismissed {:?}", dialog);
                self.dialog = None;
                true
            }
            (None, InputCommand::RequestReset) => {
                let resume_on_cancel = self.game.pause();
                self.dialog = Some(Dialog::ConfirmReset { resume_on_cancel });
                true
            }
            (None, InputCommand::Game(action)) => self.game.apply_action(action),
            (None, InputCommand::Confirm | InputCommand::Cancel) => false,
        };
        self.pump_events();
        changed
    }

    /// Advance the engine clock and react to what it reports.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let fired = self.game.tick(elapsed_ms);
        self.pump_events();
        fired
    }

    /// Render the current frame and flush it.
    pub fn draw(
        &mut self,
        view: &GameView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
        term: &mut TerminalRenderer,
    ) -> Result<()> {
        self.render_into(view, viewport, fb);
        term.draw_swap(fb)
    }

    /// Pure half of [`App::draw`].
    pub fn render_into(&mut self, view: &GameView, viewport: Viewport, fb: &mut FrameBuffer) {
        self.game.snapshot_into(&mut self.snapshot);
        let overlay = self.dialog.map(|d| d.overlay());
        view.render_into(&self.snapshot, overlay.as_ref(), viewport, fb);
    }

    fn pump_events(&mut self) {
        let events = self.game.take_events();
        dispatch(events, self);
    }
}

impl<R> GameListener for App<R> {
    fn on_new_game(&mut self) {
        debug!("new game ready");
    }

    fn on_game_over(&mut self, score: u32) {
        info!("showing game over, score {}", score);
        self.dialog = Some(Dialog::GameOver { score });
    }

    fn on_rows_cleared(&mut self, count: u32) {
        debug!("{} row(s) removed", count);
    }
}
