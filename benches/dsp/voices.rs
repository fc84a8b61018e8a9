//! Benchmarks for memoized voices: a cold render against a cache hit.

use std::hint::black_box;

use criterion::Criterion;
use saavy_synth::synth::generator::Generator;

use crate::SAMPLE_RATE;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("voices");
    group.sample_size(20);

    // Fresh generator every iteration: full additive render
    group.bench_function("tone/cold", |b| {
        b.iter(|| Generator::new(0).tone(black_box(440.0), 0.25, SAMPLE_RATE))
    });

    let mut warm = Generator::new(0);
    let _ = warm.tone(440.0, 0.25, SAMPLE_RATE);
    group.bench_function("tone/cached", |b| {
        b.iter(|| warm.tone(black_box(440.0), 0.25, SAMPLE_RATE))
    });

    // Drum cost once the shared noise source exists
    let mut drums = Generator::new(0);
    let _ = drums.filtered_noise(1_000.0, 10.0, SAMPLE_RATE);
    group.bench_function("drum_soft/new_length", |b| {
        let mut d = 0.05;
        b.iter(|| {
            d = if d > 1.0 { 0.05 } else { d + 1e-4 };
            drums.drum_soft(black_box(d), SAMPLE_RATE)
        })
    });

    group.finish();
}
