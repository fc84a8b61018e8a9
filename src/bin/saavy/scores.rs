//! Built-in scores for the demo binary.

use clap::ValueEnum;
use saavy_synth::{OutputSink, Synth, SynthResult};

use super::sequencer::{beat_seconds, drumbase, melody, Instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Score {
    /// Every drum at 400, 600 and 900 bpm, 32 straight hits each.
    Drumtest,
    /// An arpeggio over a kick and snare groove.
    Tones,
}

impl Score {
    pub fn perform<S: OutputSink>(self, synth: &mut Synth<S>) -> SynthResult<()> {
        match self {
            Score::Drumtest => drumtest(synth),
            Score::Tones => tones(synth),
        }
    }
}

const TEMPOS: [f64; 3] = [400.0, 600.0, 900.0];
const BEATS: usize = 16;

fn drumtest<S: OutputSink>(synth: &mut Synth<S>) -> SynthResult<()> {
    for tempo in TEMPOS {
        for drum in Instrument::ALL {
            println!("  {drum:?} @ {tempo} bpm");
            let beat = beat_seconds(tempo);
            let voice = drumbase(synth, &[true; BEATS * 2], beat, drum)?;
            synth.play_mix(&[voice])?;
        }
    }
    Ok(())
}

// A minor, in Hz
const A3: f64 = 220.0;
const C4: f64 = 261.63;
const E4: f64 = 329.63;
const A4: f64 = 440.0;

fn tones<S: OutputSink>(synth: &mut Synth<S>) -> SynthResult<()> {
    let beat = beat_seconds(240.0);
    let arp = [Some(A3), Some(C4), Some(E4), Some(A4), Some(E4), Some(C4), Some(A3), None];
    let kicks = [true, false, false, false, true, false, false, false];
    let snares = [false, false, true, false, false, false, true, false];

    for _ in 0..4 {
        let lead = melody(synth, &arp, beat)?;
        let kick = drumbase(synth, &kicks, beat, Instrument::Kick)?;
        let snare = drumbase(synth, &snares, beat, Instrument::Snare)?;
        synth.play_mix(&[lead, kick, snare])?;
    }
    Ok(())
}
