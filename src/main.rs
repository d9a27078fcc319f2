//! Terminal runner (default binary).
//!
//! Fixed 16ms cadence: poll input until the next tick, advance the engine by
//! the whole milliseconds passed, redraw. Logs go to `block-drop.log` because the
//! terminal is in raw mode; `RUST_LOG` overrides the default `info` filter.

use std::fs::File;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{info, warn};

use block_drop::core::{GameConfig, GameState};
use block_drop::input::map_key;
use block_drop::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use block_drop::types::TICK_MS;
use block_drop::{App, TickClock};

const LOG_FILE: &str = "block-drop.log";

fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::from_env().context("loading game config")?;
    info!("starting with {:?}", config);
    let game = GameState::with_rng(config, fastrand::Rng::new());
    let mut app = App::new(game);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut app, &mut term);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!("failed to restore terminal: {err:#}");
    }
    if let Err(err) = &result {
        warn!("exiting with error: {err:#}");
    }
    info!("bye, final score {}", app.game().score());
    result
}

fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_module_path(false)
        .init();
    Ok(())
}

fn run(app: &mut App<fastrand::Rng>, term: &mut TerminalRenderer) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut clock = TickClock::new(TICK_MS, Instant::now());

    while !app.should_quit() {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.draw(&view, Viewport::new(w, h), &mut fb, term)?;

        let timeout = clock.until_next(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(command) = map_key(key) {
                        app.handle(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if let Some(elapsed_ms) = clock.advance(Instant::now()) {
            app.tick(elapsed_ms);
        }
    }
    Ok(())
}
