//! Sequencer - beat patterns to voice segments
//!
//! A pattern is a list of steps; each step is one beat long. A hit renders the
//! instrument for one beat, a rest renders silence of the same length, so
//! every step has the same frame count and voices built from equal-length
//! patterns line up in a mix.

use saavy_synth::{OutputSink, Synth, SynthResult, Waveform};

/// Drum voices the scores can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instrument {
    /// Square thump with bright noise.
    Kick,
    /// Short dull noise burst.
    Snare,
}

impl Instrument {
    pub const ALL: [Instrument; 2] = [Instrument::Kick, Instrument::Snare];

    pub fn render<S: OutputSink>(
        self,
        synth: &mut Synth<S>,
        duration: f64,
    ) -> SynthResult<Waveform> {
        match self {
            Instrument::Kick => synth.drum_hard(duration),
            Instrument::Snare => synth.drum_soft(duration),
        }
    }
}

/// Seconds per beat at `tempo` beats per minute.
pub fn beat_seconds(tempo: f64) -> f64 {
    60.0 / tempo
}

/// Expand `pattern` into one voice: `instrument` on hits, silence on rests.
pub fn drumbase<S: OutputSink>(
    synth: &mut Synth<S>,
    pattern: &[bool],
    beat: f64,
    instrument: Instrument,
) -> SynthResult<Vec<Waveform>> {
    pattern
        .iter()
        .map(|&hit| {
            if hit {
                instrument.render(synth, beat)
            } else {
                synth.silence(beat)
            }
        })
        .collect()
}

/// Tones on every beat; a frequency of `None` is a rest.
pub fn melody<S: OutputSink>(
    synth: &mut Synth<S>,
    notes: &[Option<f64>],
    beat: f64,
) -> SynthResult<Vec<Waveform>> {
    notes
        .iter()
        .map(|note| match note {
            Some(freq) => synth.tone(*freq, beat),
            None => synth.silence(beat),
        })
        .collect()
}
