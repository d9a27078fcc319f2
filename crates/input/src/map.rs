//! Key mapping from terminal events to commands.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCommand {
    /// Forward to the engine.
    Game(GameAction),
    /// Ask before throwing the current game away.
    RequestReset,
    /// Accept the open dialog.
    Confirm,
    /// Dismiss the open dialog.
    Cancel,
    Quit,
}

/// Map a key press to a command. Releases and repeats of non-movement keys are ignored.
pub fn map_key(key: KeyEvent) -> Option<InputCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(InputCommand::Quit);
    }

    let command = match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            InputCommand::Game(GameAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            InputCommand::Game(GameAction::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            InputCommand::Game(GameAction::MoveDown)
        }
        KeyCode::Up | KeyCode::Char('r') | KeyCode::Char('R') => {
            InputCommand::Game(GameAction::Rotate)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => InputCommand::Game(GameAction::TogglePause),
        KeyCode::Char('n') | KeyCode::Char('N') => InputCommand::RequestReset,
        KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => InputCommand::Confirm,
        KeyCode::Esc => InputCommand::Cancel,
        _ => return None,
    };

    // Holding a key only repeats movement.
    if key.kind == KeyEventKind::Repeat && !is_movement(command) {
        return None;
    }
    Some(command)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn is_movement(command: InputCommand) -> bool {
    matches!(
        command,
        InputCommand::Game(GameAction::MoveLeft | GameAction::MoveRight | GameAction::MoveDown)
    )
}
