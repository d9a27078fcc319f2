use criterion::{black_box, criterion_group, criterion_main, Criterion};
use block_drop::core::{GameSnapshot, GameState, Grid};
use block_drop::term::{FrameBuffer, GameView, Viewport};
use block_drop::types::{Cell, PALETTE};

fn running_game() -> GameState {
    let mut state = GameState::new(12345);
    state.resume();
    state
}

fn bench_tick(c: &mut Criterion) {
    let mut state = running_game();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.is_paused() {
                state.resume();
            }
            state.tick(black_box(16));
            state.take_events();
        })
    });
}

fn bench_row_clear(c: &mut Criterion) {
    c.bench_function("clear_and_compact_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for y in 12..20 {
                for x in 0..10 {
                    if y < 16 && x % 3 == 0 {
                        continue;
                    }
                    grid.set(x, y, Cell::filled(PALETTE[1]));
                }
            }
            let rows = grid.full_rows();
            grid.clear_rows(&rows);
            grid.compact_after_clear(black_box(&rows));
            grid
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = running_game();

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            state.move_left();
            state.move_right();
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = running_game();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.rotate();
        })
    });
}

fn bench_snapshot_and_render(c: &mut Criterion) {
    let state = running_game();
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_render_80x24", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(black_box(&snap), None, Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_row_clear,
    bench_move,
    bench_rotate,
    bench_snapshot_and_render
);
criterion_main!(benches);
