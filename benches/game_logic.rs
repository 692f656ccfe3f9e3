use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mandarin_ten::core::{evaluate, Grid, MemoryStore, RoundController, SimpleRng};
use mandarin_ten::term::{FrameBuffer, GameView, Viewport};
use mandarin_ten::types::{Point, Rect};

fn bench_generate(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);

    c.bench_function("grid_generate", |b| {
        b.iter(|| Grid::generate(black_box(30.0), black_box(10.0), &mut rng))
    });
}

fn bench_cells_within(c: &mut Criterion) {
    let grid = Grid::generate(30.0, 10.0, &mut SimpleRng::new(12345));
    let rect = Rect::from_corners(Point::new(4.0, 2.0), Point::new(20.0, 7.0));

    c.bench_function("cells_within_half_board", |b| {
        b.iter(|| grid.cells_within(black_box(rect)).len())
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let grid = Grid::generate(30.0, 10.0, &mut SimpleRng::new(12345));
    let rect = Rect::from_corners(Point::new(0.0, 0.0), Point::new(30.0, 10.0));

    c.bench_function("evaluate_full_board", |b| {
        b.iter(|| evaluate(grid.cells_within(black_box(rect))))
    });
}

fn bench_drag_release(c: &mut Criterion) {
    let mut round = RoundController::new(MemoryStore::new(), 30.0, 10.0, 12345);
    round.start();

    c.bench_function("drag_release", |b| {
        b.iter(|| {
            round.pointer_down(Point::new(1.5, 0.5));
            round.pointer_move(black_box(Point::new(7.5, 1.5)));
            let result = round.pointer_up();
            round.drain_events().for_each(drop);
            result
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut round = RoundController::new(MemoryStore::new(), 30.0, 10.0, 12345);
    round.start();
    let snap = round.snapshot();

    c.bench_function("render_frame", |b| {
        b.iter(|| view.render_into(black_box(&snap), None, viewport, &mut fb))
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_cells_within,
    bench_evaluate,
    bench_drag_release,
    bench_render
);
criterion_main!(benches);
