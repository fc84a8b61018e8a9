use std::f64::consts::TAU;

use crate::{
    dsp::waveform::{ensure_finite, frame_count, Waveform},
    error::SynthResult,
};

/*
Block Oscillators
=================

These oscillators render a whole note at once instead of streaming sample by
sample. Every call is a pure function of its arguments, which is what lets the
generator layer memoize them.

The phase axis is uniform over [0, duration):

    phase[i] = i * duration / frames

    sample[i] = 0.5 * amplitude * sin(2π * frequency * phase[i])

The 0.5 keeps a single full-amplitude sine at half scale so a handful of
summed partials stays near [-1, 1].

frequency = 0 or amplitude = 0 gives a block of zeros of the right length.
The additive synthesizer uses that as its accumulator seed.
*/

pub fn sine(
    duration: f64,
    frequency: f64,
    amplitude: f64,
    sample_rate: u32,
) -> SynthResult<Waveform> {
    ensure_finite("frequency", frequency)?;
    ensure_finite("amplitude", amplitude)?;
    let frames = frame_count(duration, sample_rate)?;
    let step = duration / frames as f64;
    let gain = 0.5 * amplitude;

    let samples = (0..frames)
        .map(|i| {
            let phase = i as f64 * step;
            (gain * (TAU * frequency * phase).sin()) as f32
        })
        .collect();

    Ok(Waveform::new(samples, sample_rate))
}

/// Square wave built from the sign of a unit sine.
///
/// Zero crossings of the sine stay at zero.
pub fn square(
    duration: f64,
    frequency: f64,
    amplitude: f64,
    sample_rate: u32,
) -> SynthResult<Waveform> {
    ensure_finite("amplitude", amplitude)?;
    let base = sine(duration, frequency, 1.0, sample_rate)?;
    let samples = base
        .iter()
        .map(|&s| sign(s) * amplitude as f32)
        .collect();
    Ok(Waveform::new(samples, sample_rate))
}

pub fn silence(duration: f64, sample_rate: u32) -> SynthResult<Waveform> {
    let frames = frame_count(duration, sample_rate)?;
    Ok(Waveform::new(vec![0.0; frames], sample_rate))
}

#[inline]
fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
