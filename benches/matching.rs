//! Benchmarks for the matching engine.
//!
//! ```bash
//! cargo bench
//! cargo bench -- single_match
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use std::time::Duration;

use lob_sim::{EngineConfig, MatchingEngine, Side};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// 100.00000000 in fixed-point ticks
const BASE_PRICE: u64 = 10_000_000_000;

/// 0.01 in fixed-point ticks
const CENT: u64 = 1_000_000;

fn engine_with_capacity(capacity: usize) -> MatchingEngine {
    MatchingEngine::with_config(EngineConfig::default().with_capacity(capacity))
}

/// Rest `count` asks at increasing prices starting from `base_price`.
fn populate_asks(engine: &mut MatchingEngine, count: usize, base_price: u64, step: u64, qty: u64) {
    for i in 0..count as u64 {
        engine.submit_fixed(Side::Sell, base_price + i * step, qty).unwrap();
    }
}

/// Rest `count` bids at decreasing prices starting from `base_price`.
fn populate_bids(engine: &mut MatchingEngine, count: usize, base_price: u64, step: u64, qty: u64) {
    for i in 0..count as u64 {
        engine.submit_fixed(Side::Buy, base_price - i * step, qty).unwrap();
    }
}

fn generate_order_batch(count: usize, seed: u64) -> Vec<(Side, u64, u64)> {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let offset: i64 = rng.gen_range(-50i64..=50) * CENT as i64;
            let quantity: u64 = rng.gen_range(1..=100);
            (side, (BASE_PRICE as i64 + offset) as u64, quantity)
        })
        .collect()
}

// ============================================================================
// BENCHMARK: Single Match Latency
// ============================================================================

fn bench_single_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_match");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("against_1k_orders", |b| {
        b.iter_batched(
            || {
                let mut engine = engine_with_capacity(2_000);
                populate_asks(&mut engine, 1_000, BASE_PRICE, CENT, 100);
                engine
            },
            |mut engine| black_box(engine.submit_fixed(Side::Buy, BASE_PRICE, 100)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("multi_level_sweep", |b| {
        b.iter_batched(
            || {
                let mut engine = engine_with_capacity(200);
                populate_asks(&mut engine, 100, BASE_PRICE, CENT, 10);
                engine
            },
            // Sweeps 10 levels
            |mut engine| black_box(engine.submit_fixed(Side::Buy, BASE_PRICE + 10 * CENT, 100)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("no_match_rest_on_book", |b| {
        b.iter_batched(
            || {
                let mut engine = engine_with_capacity(2_000);
                populate_asks(&mut engine, 1_000, BASE_PRICE, CENT, 100);
                engine
            },
            |mut engine| black_box(engine.submit_fixed(Side::Buy, BASE_PRICE - CENT, 100)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Cancel
// ============================================================================

fn bench_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("cancel");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("cancel_mid_book", |b| {
        b.iter_batched(
            || {
                let mut engine = engine_with_capacity(2_000);
                populate_bids(&mut engine, 1_000, BASE_PRICE, CENT, 100);
                engine
            },
            |mut engine| black_box(engine.cancel(500)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("cancel_mid_queue", |b| {
        b.iter_batched(
            || {
                // 1000 orders queued at one price
                let mut engine = engine_with_capacity(2_000);
                populate_bids(&mut engine, 1_000, BASE_PRICE, 0, 100);
                engine
            },
            |mut engine| black_box(engine.cancel(500)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Throughput
// ============================================================================

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(50);

    for batch_size in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_with_input(
            BenchmarkId::new("orders", batch_size),
            &batch_size,
            |b, &size| {
                let orders = generate_order_batch(size, 42);

                b.iter_batched(
                    || (engine_with_capacity(size), orders.clone()),
                    |(mut engine, orders)| {
                        for (side, price, quantity) in orders {
                            let _ = black_box(engine.submit_fixed(side, price, quantity));
                        }
                        engine.order_count()
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_single_match, bench_cancel, bench_throughput);
criterion_main!(benches);
