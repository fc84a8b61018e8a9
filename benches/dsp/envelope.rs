//! Benchmarks for the fractional ADSR envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_synth::dsp::envelope::Adsr;

use crate::{DURATIONS, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let env = Adsr::new(0.1, 0.2, 0.6, 0.2);

    for &duration in DURATIONS {
        let frames = (duration * SAMPLE_RATE as f64).round() as usize;

        group.bench_with_input(BenchmarkId::new("render", frames), &frames, |b, &n| {
            b.iter(|| env.render(black_box(n)))
        });

        // In-place multiply, as the voices use it
        let mut buffer = vec![0.5f32; frames];
        group.bench_with_input(BenchmarkId::new("apply", frames), &frames, |b, _| {
            b.iter(|| env.apply(black_box(&mut buffer)))
        });
    }

    group.finish();
}
