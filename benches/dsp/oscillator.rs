//! Benchmarks for block oscillators.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_synth::dsp::oscillator;

use crate::{DURATIONS, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &duration in DURATIONS {
        // Sine - one sin() per frame
        group.bench_with_input(BenchmarkId::new("sine", duration), &duration, |b, &d| {
            b.iter(|| oscillator::sine(black_box(d), black_box(440.0), 1.0, SAMPLE_RATE))
        });

        // Square - sine plus a sign pass
        group.bench_with_input(BenchmarkId::new("square", duration), &duration, |b, &d| {
            b.iter(|| oscillator::square(black_box(d), black_box(20.0), 0.2, SAMPLE_RATE))
        });
    }

    group.finish();
}
