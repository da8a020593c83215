#[path = "../tests/fixtures/mod.rs"]
mod fixtures;

use crate::fixtures::load_reference_closes;

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use wilder_rsi::{Precision, PriceSeries, Rsi, RsiConfig, compute_series, compute_series_columns};
use std::{hint::black_box, time::Duration};

/// The fixture repeated until it is long enough to dominate setup cost.
fn long_series() -> Vec<f64> {
    let closes = load_reference_closes();
    closes.iter().copied().cycle().take(closes.len() * 100).collect()
}

fn config(length: usize, precision: Precision) -> RsiConfig {
    RsiConfig::new(length)
        .expect("non zero length")
        .with_precision(precision)
}

fn stream_benchmarks(c: &mut Criterion) {
    let prices = long_series();
    let series = PriceSeries::new(&prices).expect("valid fixture");
    let mut group = c.benchmark_group("stream");
    group.throughput(Throughput::Elements(prices.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    macro_rules! stream_bench {
        ($name:expr, $config:expr) => {
            group.bench_function($name, |b| {
                b.iter(|| black_box(compute_series(&series, $config)));
            });
        };
    }

    stream_bench!("rsi14", config(14, Precision::Full));
    stream_bench!("rsi140", config(140, Precision::Full));
    stream_bench!("rsi14_rounded", config(14, Precision::CENTS));

    group.finish();
}

fn batch_benchmarks(c: &mut Criterion) {
    let prices = long_series();
    let series = PriceSeries::new(&prices).expect("valid fixture");
    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(prices.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    macro_rules! batch_bench {
        ($name:expr, $config:expr) => {
            group.bench_function($name, |b| {
                b.iter(|| black_box(compute_series_columns(&series, $config)));
            });
        };
    }

    batch_bench!("rsi14", config(14, Precision::Full));
    batch_bench!("rsi140", config(140, Precision::Full));
    batch_bench!("rsi14_rounded", config(14, Precision::CENTS));

    group.finish();
}

fn tick_benchmarks(c: &mut Criterion) {
    let prices = long_series();
    let mut group = c.benchmark_group("tick");
    group.sample_size(200);
    group.noise_threshold(0.03);
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    // Pre-feed all prices except the last, then benchmark a single compute() call.
    let (warmup, last) = prices.split_at(prices.len() - 1);

    macro_rules! tick_bench {
        ($name:expr, $config:expr) => {
            group.bench_function($name, |b| {
                b.iter_batched(
                    || {
                        let mut rsi = Rsi::new($config);
                        for &price in warmup {
                            rsi.compute(price);
                        }
                        rsi
                    },
                    |mut rsi| {
                        black_box(rsi.compute(last[0]));
                    },
                    BatchSize::SmallInput,
                );
            });
        };
    }

    tick_bench!("rsi14", config(14, Precision::Full));
    tick_bench!("rsi14_rounded", config(14, Precision::CENTS));

    group.finish();
}

criterion_group!(benches, stream_benchmarks, batch_benchmarks, tick_benchmarks);
criterion_main!(benches);
