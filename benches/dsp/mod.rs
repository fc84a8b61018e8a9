//! Benchmarks for block DSP primitives.

mod envelope;
mod mix;
mod noise;
mod oscillator;
mod voices;

pub use envelope::bench_envelope;
pub use mix::bench_mix;
pub use noise::bench_noise;
pub use oscillator::bench_oscillator;
pub use voices::bench_voices;
