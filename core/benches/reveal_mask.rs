use std::hint::black_box;

use cinemystery_core::{CellOrder, DEFAULT_GRID, DiscoveredLetters, RevealMask};
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_reveal_mask(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_mask");

    let unseeded = CellOrder::Unseeded(0x5eed);
    group.bench_function("unseeded_30", |b| {
        b.iter(|| RevealMask::compute(black_box(DEFAULT_GRID), black_box(30), &unseeded))
    });

    let discovered: DiscoveredLetters = "shawnkredmption".chars().collect();
    let seeded = CellOrder::for_letters(&discovered, 0);
    group.bench_function("seeded_60", |b| {
        b.iter(|| RevealMask::compute(black_box(DEFAULT_GRID), black_box(60), &seeded))
    });

    group.bench_function("seeded_255x255", |b| {
        b.iter(|| RevealMask::compute(black_box((255, 255)), black_box(60), &seeded))
    });

    group.finish();
}

criterion_group!(benches, bench_reveal_mask);
criterion_main!(benches);
