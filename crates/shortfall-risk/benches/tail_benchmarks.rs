//! Criterion benchmarks for the rolling tail-risk kernel.
//!
//! Each day re-sorts its full trailing window, so the rolling estimator is
//! the dominant cost of a back-test run; these benchmarks track it across
//! realistic window sizes.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shortfall_core::{RiskConfig, TimeSeries};
use shortfall_risk::prelude::*;

/// Generate a synthetic return series with deterministic noise.
fn generate_deltas(n: usize) -> TimeSeries {
    let start = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    let pairs = (0..n).map(|i| {
        let day = start + chrono::Days::new(i as u64);
        let noise = (((i * 2654435761) % 1000) as f64 - 500.0) / 25_000.0;
        let drift = 0.0002;
        (day, drift + noise)
    });
    TimeSeries::from_pairs(pairs).unwrap()
}

fn bench_rolling_tail_risk(c: &mut Criterion) {
    let deltas = generate_deltas(3000);
    let mut group = c.benchmark_group("rolling_tail_risk");

    for window in [100usize, 250, 500] {
        let config = RiskConfig::new().with_window(window).with_lag(1);
        group.bench_with_input(
            BenchmarkId::from_parameter(window),
            &config,
            |b, config| b.iter(|| rolling_tail_risk(black_box(&deltas), config).unwrap()),
        );
    }
    group.finish();
}

fn bench_label_series(c: &mut Criterion) {
    let deltas = generate_deltas(3000);

    c.bench_function("label_series_500", |b| {
        b.iter(|| label_series(black_box(&deltas), 500).unwrap())
    });
}

criterion_group!(benches, bench_rolling_tail_risk, bench_label_series);
criterion_main!(benches);
