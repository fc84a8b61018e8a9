pub mod config;
pub mod dsp; // Block oscillators, envelopes and noise
pub mod error;
pub mod io; // Output sinks
pub mod runtime; // Scoped rendering sessions
pub mod synth; // Memoized voices and mixing

pub use config::SessionConfig;
pub use dsp::waveform::Waveform;
pub use error::{SinkError, SynthError, SynthResult};
pub use io::OutputSink;
pub use synth::Synth;

/// Sample rate used when a session does not pick one.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
