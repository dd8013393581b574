use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use minefield::{Board, GameState, Position};

/// Opening the center of a sparse board cascades through most of the grid,
/// so this times the flood fill rather than the single reveal.
fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");

    for &size in &[16u32, 64, 128] {
        group.bench_function(format!("{}x{}", size, size), |b| {
            b.iter_batched(
                || Board::with_seed(size, size, size, 7).unwrap(),
                |mut board| {
                    let center = Position::new(size as i32 / 2, size as i32 / 2);
                    board.open(center).unwrap()
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_hint_playout(c: &mut Criterion) {
    c.bench_function("hint_playout_16x16", |b| {
        b.iter_batched(
            || Board::with_seed(16, 16, 40, 11).unwrap(),
            |mut board| {
                while board.state() == GameState::Playing {
                    board.hint().unwrap();
                }
                board.state()
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_flood_fill, bench_hint_playout);
criterion_main!(benches);
