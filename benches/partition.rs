//! Partition engine benchmarks.
//!
//! Run with `cargo bench --bench partition`.

use casino_engine::cards::Card;
use casino_engine::rules::{initialize_game_with_seed, legal_actions, partition, partition_exists};
use casino_engine::core::CasinoConfig;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn cards(codes: &[&str]) -> Vec<Card> {
    codes.iter().filter_map(|c| c.parse().ok()).collect()
}

fn bench_partition(c: &mut Criterion) {
    let pair = cards(&["4D", "6C"]);
    let wide = cards(&["AS", "2S", "3S", "4S", "5S", "6S", "9S", "10D", "7H", "3H"]);
    let impossible = cards(&["AS", "AH", "AD", "AC", "2S", "2H", "2D", "2C", "3S", "9H"]);

    c.bench_function("partition_exists_pair", |b| {
        b.iter(|| partition_exists(black_box(&pair), black_box(10)))
    });
    c.bench_function("partition_wide_table", |b| {
        b.iter(|| partition(black_box(&wide), black_box(10)))
    });
    c.bench_function("partition_exhausted_search", |b| {
        b.iter(|| partition_exists(black_box(&impossible), black_box(6)))
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let Ok(state) = initialize_game_with_seed(CasinoConfig::default(), 42) else {
        return;
    };
    c.bench_function("legal_actions_opening", |b| b.iter(|| legal_actions(black_box(&state))));
}

criterion_group!(benches, bench_partition, bench_legal_actions);
criterion_main!(benches);
