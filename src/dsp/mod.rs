//! Block DSP primitives used by the voice generators.
//!
//! Everything here renders a complete note into a fresh buffer and is a pure
//! function of its arguments (noise included, given a seed). That purity is
//! what the waveform cache relies on.

/// Attack/decay/sustain/release envelope given as fractions of the note.
pub mod envelope;
/// FFT brick-wall low-pass over seeded Gaussian noise.
pub mod noise;
/// Sine, square and silence.
pub mod oscillator;
/// The immutable sample buffer every generator returns.
pub mod waveform;

pub use envelope::Adsr;
pub use waveform::Waveform;
