#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};

/*
Fractional ADSR Envelope
========================

A block envelope: the whole note length is known up front, so each stage is
given as a FRACTION of that length rather than a time in seconds.

Vocabulary
----------

  total       Frame count of the signal being shaped.

  attack      Fraction of `total` spent ramping 0 → 1.

  decay       Fraction of `total` spent ramping 1 → sustain_level.

  sustain     Not a fraction. The level held between decay and release.
              Sustain length is whatever the other three stages leave over.

  release     Fraction of `total` spent ramping sustain_level → 0.


Frame Accounting
----------------

    attack_frames  = floor(total * attack)
    decay_frames   = floor(total * decay)
    release_frames = floor(total * release)
    sustain_frames = total - attack_frames - decay_frames - release_frames

The four segments always add up to exactly `total`. If the fractions ask for
more than `total` frames the sustain count would go negative, and that is
rejected.


The Shape
---------

  Level
    1.0 ┐   ╱╲
        │  ╱  ╲___________
    S   │ ╱               ╲
        │╱                 ╲
    0.0 └───────────────────╲─→ frames
         A   D      S        R

Each segment is a straight line sampled with both endpoints included, so a
segment of n frames holds n evenly spaced points from its start level to its
end level. One frame holds just the start level, zero frames hold nothing.
That keeps the first attack sample at exactly 0 and the last release sample at
exactly 0.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    pub attack: f64,
    pub decay: f64,
    pub sustain_level: f32,
    pub release: f64,
}

/// Frame counts for each stage of one rendered envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments {
    pub attack: usize,
    pub decay: usize,
    pub sustain: usize,
    pub release: usize,
}

impl Segments {
    pub fn total(&self) -> usize {
        self.attack + self.decay + self.sustain + self.release
    }
}

impl Adsr {
    pub const fn new(attack: f64, decay: f64, sustain_level: f32, release: f64) -> Self {
        Self {
            attack,
            decay,
            sustain_level,
            release,
        }
    }

    /// Split `total_frames` into stage lengths.
    pub fn segments(&self, total_frames: usize) -> SynthResult<Segments> {
        if total_frames == 0 {
            return Err(SynthError::invalid_param(
                "total_frames",
                "must be greater than zero",
            ));
        }
        check_fraction("attack", self.attack)?;
        check_fraction("decay", self.decay)?;
        check_fraction("release", self.release)?;
        if !self.sustain_level.is_finite() {
            return Err(SynthError::invalid_param(
                "sustain_level",
                format!("{} is not finite", self.sustain_level),
            ));
        }

        let frames = total_frames as f64;
        let attack = (frames * self.attack).floor() as usize;
        let decay = (frames * self.decay).floor() as usize;
        let release = (frames * self.release).floor() as usize;
        let overfull = || {
            SynthError::invalid_param(
                "release",
                format!(
                    "attack {} + decay {} + release {} leave no room in {total_frames} frames",
                    self.attack, self.decay, self.release
                ),
            )
        };
        let sustain = attack
            .checked_add(decay)
            .and_then(|used| used.checked_add(release))
            .and_then(|used| total_frames.checked_sub(used))
            .ok_or_else(overfull)?;

        Ok(Segments {
            attack,
            decay,
            sustain,
            release,
        })
    }

    /// Render the multiplier curve for a signal of `total_frames` samples.
    pub fn render(&self, total_frames: usize) -> SynthResult<Vec<f32>> {
        let seg = self.segments(total_frames)?;
        let s = self.sustain_level;

        let mut out = Vec::with_capacity(total_frames);
        ramp(&mut out, 0.0, 1.0, seg.attack);
        ramp(&mut out, 1.0, s, seg.decay);
        ramp(&mut out, s, s, seg.sustain);
        ramp(&mut out, s, 0.0, seg.release);

        debug_assert_eq!(out.len(), total_frames);
        Ok(out)
    }

    /// Multiply `samples` by this envelope in place.
    pub fn apply(&self, samples: &mut [f32]) -> SynthResult<()> {
        let curve = self.render(samples.len())?;
        for (sample, gain) in samples.iter_mut().zip(curve) {
            *sample *= gain;
        }
        Ok(())
    }
}

fn check_fraction(name: &'static str, value: f64) -> SynthResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SynthError::invalid_param(
            name,
            format!("fraction must be finite and non-negative, got {value}"),
        ));
    }
    Ok(())
}

/// Append `n` evenly spaced points from `start` to `end`, both included.
fn ramp(out: &mut Vec<f32>, start: f32, end: f32, n: usize) {
    match n {
        0 => {}
        1 => out.push(start),
        _ => {
            let span = (n - 1) as f32;
            out.extend((0..n).map(|i| start + (end - start) * (i as f32 / span)));
        }
    }
}
