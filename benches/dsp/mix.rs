//! Benchmarks for voice concatenation and summing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_synth::{synth::mixer::mix_voices, Waveform};

use crate::SAMPLE_RATE;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");
    let step = 2_205;

    for &voices in &[1usize, 4, 8] {
        // 16 steps per voice, every voice the same length
        let mix: Vec<Vec<Waveform>> = (0..voices)
            .map(|v| {
                (0..16)
                    .map(|i| {
                        let samples =
                            (0..step).map(|n| ((n + i + v) as f32 * 0.01).sin()).collect();
                        Waveform::new(samples, SAMPLE_RATE)
                    })
                    .collect()
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("voices", voices), &mix, |b, mix| {
            b.iter(|| mix_voices(black_box(mix)))
        });
    }

    group.finish();
}
