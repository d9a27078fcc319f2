//! Outward notifications.
//!
//! The engine buffers [`GameEvent`]s while it mutates state and never calls out
//! mid-transition. Front ends drain the buffer after each input or tick and
//! either match on the events or hand them to a [`GameListener`].

use crate::types::GameEvent;

/// Hooks a presentation layer implements. Every hook defaults to a no-op.
pub trait GameListener {
    fn on_new_game(&mut self) {}

    fn on_score_changed(&mut self, _score: u32) {}

    fn on_game_over(&mut self, _score: u32) {}

    fn on_piece_locked(&mut self) {}

    fn on_rows_cleared(&mut self, _count: u32) {}
}

/// Route events to the matching listener hooks, in order.
pub fn dispatch<L, I>(events: I, listener: &mut L)
where
    L: GameListener + ?Sized,
    I: IntoIterator<Item = GameEvent>,
{
    for event in events {
        match event {
            GameEvent::NewGame => listener.on_new_game(),
            GameEvent::ScoreChanged(score) => listener.on_score_changed(score),
            GameEvent::GameOver { score } => listener.on_game_over(score),
            GameEvent::PieceLocked => listener.on_piece_locked(),
            GameEvent::RowsCleared { count } => listener.on_rows_cleared(count),
        }
    }
}
