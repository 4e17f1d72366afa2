//! Throughput of the full filter over synthetic detector output.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use decay_rng::{Filter, FilterConfig, OutputFormat};
use std::hint::black_box;
use std::io::{self, Cursor};

pub const SAMPLES: usize = 100_000;

pub fn gen_records(n: usize) -> String {
    // Linear congruential brightness values; only the spread matters here
    let mut state = 0x2545_F491_u64;
    (0..n)
        .map(|frame| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let brightness = 51 + (state >> 33) % 205;
            format!("{},{},{},{}\n", frame, brightness, (state >> 8) % 320, (state >> 20) % 240)
        })
        .collect()
}

fn bench_formats(c: &mut Criterion) {
    let input = gen_records(SAMPLES);
    let mut group = c.benchmark_group("filter");
    group.throughput(Throughput::Elements(SAMPLES as u64));

    for format in OutputFormat::ALL {
        let filter = Filter::new(FilterConfig {
            format,
            column: 1,
            ..Default::default()
        });

        group.bench_function(format.name(), |b| {
            b.iter(|| {
                filter
                    .run(Cursor::new(black_box(input.as_bytes())), io::sink())
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_formats);
criterion_main!(benches);
