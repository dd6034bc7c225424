//! Benchmarks for histogram inserts and selectivity queries.

use criterion::{Criterion, criterion_group, criterion_main};
use estima_core::{IntHistogram, NUM_HIST_BINS, PredicateOp, StringHistogram};
use std::hint::black_box;

fn bench_add_value(c: &mut Criterion) {
    c.bench_function("int_histogram_add_10k", |b| {
        b.iter(|| {
            let mut hist = IntHistogram::new(NUM_HIST_BINS, 0, 1_000_000);
            for v in (0..10_000).map(|i| (i * 97) % 1_000_000) {
                hist.add_value(black_box(v));
            }
            hist
        });
    });

    c.bench_function("string_histogram_add_10k", |b| {
        let words: Vec<String> = (0..10_000).map(|i| format!("w{i:05}")).collect();
        b.iter(|| {
            let mut hist = StringHistogram::new(NUM_HIST_BINS);
            for w in &words {
                hist.add_value(black_box(w));
            }
            hist
        });
    });
}

fn bench_selectivity(c: &mut Criterion) {
    let mut hist = IntHistogram::new(NUM_HIST_BINS, 0, 1_000_000);
    for v in (0..100_000).map(|i| (i * 7919) % 1_000_000) {
        hist.add_value(v);
    }

    let mut group = c.benchmark_group("int_histogram_selectivity");
    for op in [PredicateOp::Equals, PredicateOp::LessThan, PredicateOp::GreaterThanOrEq] {
        group.bench_function(op.symbol(), |b| {
            b.iter(|| hist.estimate_selectivity(op, black_box(431_337)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_add_value, bench_selectivity);
criterion_main!(benches);
