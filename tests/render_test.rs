//! Terminal view tests: board frame, cell colors, side panel and overlays

use block_drop::core::{GameSnapshot, GameState};
use block_drop::term::{AnchorY, FrameBuffer, GameView, Overlay, Viewport};
use block_drop::types::{Cell, GamePhase, CLEARING_COLOR, COLUMNS, PALETTE};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn running_snapshot() -> GameSnapshot {
    let mut game = GameState::new(1);
    game.resume();
    game.snapshot()
}

#[test]
fn view_renders_border_corners() {
    let snap = running_snapshot();
    let view = GameView::default();

    // 10x20 cells at 2x1 plus a one-glyph border.
    let fb = view.render(&snap, None, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn taken_cell_is_two_glyphs_wide_in_its_color() {
    let mut snap = running_snapshot();
    snap.grid = [[Cell::EMPTY; COLUMNS as usize]; 20];
    snap.grid[19][0] = Cell::filled(PALETTE[4]);

    let fb = GameView::default().render(&snap, None, Viewport::new(22, 22));

    for x in [1, 2] {
        let glyph = fb.get(x, 20).unwrap();
        assert_eq!(glyph.ch, '█');
        assert_eq!(glyph.style.fg, PALETTE[4]);
    }
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn clearing_rows_render_in_the_highlight_color() {
    let mut snap = running_snapshot();
    snap.phase = GamePhase::Clearing;
    snap.active = None;
    for cell in snap.grid[19].iter_mut() {
        *cell = Cell::filled(CLEARING_COLOR);
    }

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, None, Viewport::new(60, 22));

    // Frame is centered horizontally: (60 - 22) / 2 = 19.
    for x in 20..=39 {
        assert_eq!(fb.get(x, 20).unwrap().style.fg, CLEARING_COLOR);
    }
    assert!(screen_text(&fb).contains("CLEARING"));
}

#[test]
fn side_panel_shows_score_when_wide_enough() {
    let mut snap = running_snapshot();
    snap.score = 1234;

    let fb = GameView::default().render(&snap, None, Viewport::new(60, 22));
    let text = screen_text(&fb);
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));

    let narrow = GameView::default().render(&snap, None, Viewport::new(22, 22));
    assert!(!screen_text(&narrow).contains("SCORE"));
}

#[test]
fn paused_snapshot_gets_a_paused_banner() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, None, Viewport::new(22, 22));
    assert!(screen_text(&fb).contains("PAUSED"));
}

#[test]
fn overlay_text_and_score_are_drawn() {
    let snap = running_snapshot();
    let overlay = Overlay::new("GAME OVER", &["try again"]).with_score(90);

    let fb = GameView::default().render(&snap, Some(&overlay), Viewport::new(22, 22));
    let text = screen_text(&fb);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("try again"));
    assert!(text.contains("SCORE 90"));
}

#[test]
fn render_into_reuses_the_buffer() {
    let snap = running_snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(1, 1);

    view.render_into(&snap, None, Viewport::new(30, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (30, 24));
    assert_eq!(fb, view.render(&snap, None, Viewport::new(30, 24)));
}
