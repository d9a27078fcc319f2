//! Integration tests for the game loop, driven only through the public API

use std::collections::VecDeque;

use block_drop::core::{GameConfig, GameListener, GameState, RandomSource, TimerKind};
use block_drop::types::{
    GameAction, GameEvent, GamePhase, PieceKind, COLUMNS, DROP_INTERVAL_MS, SPAWN_X, SPAWN_Y,
};

/// Plays back `(kind index, color index)` pairs, then repeats O pieces.
struct ScriptedRng {
    draws: VecDeque<u32>,
}

impl ScriptedRng {
    fn pieces(kinds: &[PieceKind]) -> Self {
        let mut draws = VecDeque::new();
        for kind in kinds {
            let index = PieceKind::ALL.iter().position(|k| k == kind).unwrap() as u32 + 1;
            draws.push_back(index);
            draws.push_back(3);
        }
        Self { draws }
    }
}

impl RandomSource for ScriptedRng {
    fn range(&mut self, min: u32, max: u32) -> u32 {
        self.draws.pop_front().unwrap_or(min).clamp(min, max)
    }
}

fn scripted(kinds: &[PieceKind]) -> GameState<ScriptedRng> {
    let mut game = GameState::with_rng(GameConfig::default(), ScriptedRng::pieces(kinds));
    game.take_events();
    assert!(game.resume());
    game
}

/// Push the active piece to the floor and tick until it locks.
fn drop_and_lock<R: RandomSource>(game: &mut GameState<R>) -> Vec<GameEvent> {
    while game.move_down() {}
    let mut events = Vec::new();
    for _ in 0..10 {
        game.tick(DROP_INTERVAL_MS);
        events.extend(game.take_events());
        if events.contains(&GameEvent::PieceLocked) {
            return events;
        }
    }
    panic!("piece never locked");
}

fn shift<R: RandomSource>(game: &mut GameState<R>, dx: i8) {
    for _ in 0..dx.unsigned_abs() {
        let moved = if dx < 0 { game.move_left() } else { game.move_right() };
        assert!(moved);
    }
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameState::new(12345);
    assert!(game.is_paused());
    assert!(game.active().is_some());
    assert_eq!(game.offset().x, SPAWN_X);
    assert_eq!(game.offset().y, SPAWN_Y);

    assert!(game.apply_action(GameAction::TogglePause));
    assert_eq!(game.phase(), GamePhase::Running);
    assert!(game.scheduler().is_armed(TimerKind::Drop));

    game.tick(DROP_INTERVAL_MS * 2);
    assert_eq!(game.offset().y, 2);
}

#[test]
fn right_wall_stops_an_o_piece_at_column_eight() {
    let mut game = scripted(&[PieceKind::O]);
    shift(&mut game, 4);
    assert_eq!(game.offset().x, 8);
    assert!(!game.move_right());
    assert_eq!(game.offset().x, 8);
}

#[test]
fn filling_the_bottom_row_scores_one_row() {
    let mut game = scripted(&[PieceKind::I, PieceKind::I, PieceKind::O]);

    shift(&mut game, -4);
    drop_and_lock(&mut game);

    drop_and_lock(&mut game);

    shift(&mut game, 4);
    let events = drop_and_lock(&mut game);
    assert!(events.contains(&GameEvent::ScoreChanged(COLUMNS as u32)));
    assert_eq!(game.phase(), GamePhase::Clearing);
    assert_eq!(game.clearing_rows(), &[19]);

    game.tick(game.config().clear_animation_ms);
    let events = game.take_events();
    assert!(events.contains(&GameEvent::RowsCleared { count: 1 }));
    assert_eq!(game.score(), 10);

    // Only the top half of the O remains, dropped into the bottom row.
    assert_eq!(game.grid().taken_count(), 2);
    assert!(game.grid().get(8, 19).unwrap().taken);
    assert!(game.grid().get(9, 19).unwrap().taken);
    assert!(game.active().is_some());
}

#[test]
fn stacking_in_the_spawn_column_ends_the_game() {
    let mut game = scripted(&[]);
    let mut events = Vec::new();

    for _ in 0..20 {
        events.extend(drop_and_lock(&mut game));
        if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
            break;
        }
    }

    let over = events
        .iter()
        .position(|e| *e == GameEvent::GameOver { score: 0 })
        .expect("game over");
    assert_eq!(
        &events[over..],
        &[
            GameEvent::GameOver { score: 0 },
            GameEvent::NewGame,
            GameEvent::ScoreChanged(0)
        ]
    );
    assert!(game.is_paused());
    assert_eq!(game.grid().taken_count(), 0);
    assert_eq!(game.game_id(), 2);
}

#[test]
fn input_is_ignored_during_the_clear_animation() {
    let mut game = scripted(&[PieceKind::I, PieceKind::I, PieceKind::O]);
    shift(&mut game, -4);
    drop_and_lock(&mut game);
    drop_and_lock(&mut game);
    shift(&mut game, 4);
    drop_and_lock(&mut game);
    assert_eq!(game.phase(), GamePhase::Clearing);

    assert!(!game.apply_action(GameAction::MoveLeft));
    assert!(!game.apply_action(GameAction::Rotate));
    assert!(!game.apply_action(GameAction::MoveDown));

    // Pause still works and freezes the animation.
    assert!(game.apply_action(GameAction::TogglePause));
    game.tick(10_000);
    assert!(game.grid().row_has_taken(19));
    assert!(game.apply_action(GameAction::TogglePause));
    assert_eq!(game.phase(), GamePhase::Clearing);
}

#[test]
fn independent_games_do_not_share_state() {
    let mut a = GameState::new(5);
    let b = GameState::new(5);
    a.resume();
    a.tick(DROP_INTERVAL_MS * 3);

    assert_eq!(a.offset().y, 3);
    assert_eq!(b.offset().y, 0);
    assert!(b.is_paused());
}

#[test]
fn same_seed_same_game() {
    let script = |seed| {
        let mut game = GameState::new(seed);
        game.resume();
        for step in 0..400u32 {
            match step % 5 {
                0 => game.move_left(),
                1 => game.rotate(),
                2 => game.move_right(),
                _ => game.tick(DROP_INTERVAL_MS),
            };
        }
        game.snapshot()
    };
    assert_eq!(script(77), script(77));
}

#[derive(Default)]
struct Counter {
    new_games: u32,
    last_score: Option<u32>,
}

impl GameListener for Counter {
    fn on_new_game(&mut self) {
        self.new_games += 1;
    }

    fn on_score_changed(&mut self, score: u32) {
        self.last_score = Some(score);
    }
}

#[test]
fn listener_sees_reset_notifications() {
    let mut game = GameState::new(3);
    let mut counter = Counter::default();
    game.dispatch_events(&mut counter);
    assert_eq!(counter.new_games, 1);
    assert_eq!(counter.last_score, Some(0));

    game.resume();
    drop_and_lock(&mut game);
    game.apply_action(GameAction::Reset);
    game.dispatch_events(&mut counter);

    assert_eq!(counter.new_games, 2);
    assert_eq!(counter.last_score, Some(0));
}
