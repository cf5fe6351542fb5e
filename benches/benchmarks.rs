//! Benchmarks for thinkstats
//!
//! Compares the raw and histogram storage modes on push throughput and on the
//! queries that rebuild the sorted view.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use thinkstats::{Mode, Stats, StatsConfig};

const VALUES: u64 = 200_000;

/// Deterministic values in `[0, spread)` (xorshift64)
fn values(spread: u64) -> Vec<f64> {
    let mut state = 0x853c49e6748fea9bu64;
    (0..VALUES)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % spread) as f64
        })
        .collect()
}

fn filled(mode: Mode, data: &[f64]) -> Stats {
    let mut stats = Stats::with_config(StatsConfig::new().mode(mode));
    stats.push(data);
    stats
}

// ============================================================================
// Push
// ============================================================================

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");
    group.throughput(Throughput::Elements(VALUES));

    for spread in [100u64, 100_000] {
        let data = values(spread);
        for mode in [Mode::Raw, Mode::Histogram] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", mode), spread),
                &data,
                |b, data| b.iter(|| black_box(filled(mode, data))),
            );
        }
    }

    group.finish();
}

// ============================================================================
// Queries
// ============================================================================

fn bench_sorted(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted");

    for spread in [100u64, 100_000] {
        let data = values(spread);
        for mode in [Mode::Raw, Mode::Histogram] {
            let stats = filled(mode, &data);
            group.bench_function(BenchmarkId::new(format!("{:?}", mode), spread), |b| {
                // Clone so every iteration starts from a stale sorted view.
                b.iter(|| black_box(stats.clone().sorted().len()))
            });
        }
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let data = values(1_000);

    for mode in [Mode::Raw, Mode::Histogram] {
        let stats = filled(mode, &data);
        let _ = stats.sorted();

        group.bench_function(format!("{:?}/variance", mode), |b| {
            b.iter(|| black_box(stats.variance()))
        });
        group.bench_function(format!("{:?}/sorted_index_of", mode), |b| {
            b.iter(|| black_box(stats.sorted_index_of(black_box(500.0))))
        });
        group.bench_function(format!("{:?}/cdf", mode), |b| {
            b.iter(|| black_box(stats.cdf(black_box(500.0))))
        });
        group.bench_function(format!("{:?}/distribution", mode), |b| {
            b.iter(|| black_box(stats.distribution()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_push, bench_sorted, bench_queries);
criterion_main!(benches);
