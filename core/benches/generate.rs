use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tilesweep_core::*;

const TIERS: [(&str, Coord, CellCount); 4] = [
    ("small", 8, 15),
    ("medium", 16, 40),
    ("large", 32, 200),
    ("dense", 32, 600),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, side, mines) in TIERS {
        let config = GameConfig::new_unchecked(side, mines);
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(RandomMinefieldGenerator::new(seed).generate(config))
            });
        });
    }
    group.finish();
}

fn bench_cascade(c: &mut Criterion) {
    c.bench_function("cascade_open_board", |b| {
        b.iter_batched(
            || GameSession::from_board(Board::from_mines(64, &[0]).unwrap()),
            |mut game| black_box(game.select(4095)),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_generate, bench_cascade);
criterion_main!(benches);
