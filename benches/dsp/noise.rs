//! Benchmarks for FFT band-limited noise.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_synth::dsp::noise::{lowpass_noise, NoiseSpec};

use crate::{DURATIONS, SAMPLE_RATE};

pub fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/noise");
    group.sample_size(20);

    for &duration in DURATIONS {
        let spec = NoiseSpec::new(1_000.0, duration, SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("lowpass", duration), &spec, |b, spec| {
            b.iter(|| lowpass_noise(black_box(spec), 0))
        });
    }

    group.finish();
}
