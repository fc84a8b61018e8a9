use std::{ops::Deref, sync::Arc};

use crate::error::{SynthError, SynthResult};

/// An immutable block of mono samples rendered at a known sample rate.
///
/// Cloning is cheap: clones share one buffer. A cache hit hands out a clone of
/// the stored waveform, so `ptr_eq` tells whether two handles came from the
/// same computation.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Arc<[f32]>,
    sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples: samples.into(),
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// True when both handles share the same sample buffer.
    pub fn ptr_eq(&self, other: &Waveform) -> bool {
        Arc::ptr_eq(&self.samples, &other.samples)
    }

    /// Copy the first `frames` samples into a new waveform.
    pub fn head(&self, frames: usize) -> SynthResult<Waveform> {
        if frames > self.samples.len() {
            return Err(SynthError::invalid_param(
                "frames",
                format!(
                    "requested {frames} frames from a {} frame source",
                    self.samples.len()
                ),
            ));
        }
        Ok(Waveform::new(self.samples[..frames].to_vec(), self.sample_rate))
    }
}

impl Deref for Waveform {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.samples
    }
}

impl AsRef<[f32]> for Waveform {
    fn as_ref(&self) -> &[f32] {
        &self.samples
    }
}

/// Longest buffer any generator will allocate, a little over 27 hours at 44.1 kHz.
pub const MAX_FRAMES: usize = u32::MAX as usize;

/// Number of frames covering `duration` seconds: round(duration * sample_rate).
///
/// Fails unless the result is between one frame and [`MAX_FRAMES`].
pub fn frame_count(duration: f64, sample_rate: u32) -> SynthResult<usize> {
    if !duration.is_finite() {
        return Err(SynthError::invalid_param(
            "duration",
            format!("{duration} is not finite"),
        ));
    }
    if sample_rate == 0 {
        return Err(SynthError::invalid_param(
            "sample_rate",
            "must be greater than zero",
        ));
    }
    let frames = (duration * sample_rate as f64).round();
    if frames < 1.0 {
        return Err(SynthError::invalid_param(
            "duration",
            format!("{duration} s at {sample_rate} Hz is less than one frame"),
        ));
    }
    if frames > MAX_FRAMES as f64 {
        return Err(SynthError::invalid_param(
            "duration",
            format!("{duration} s at {sample_rate} Hz exceeds {MAX_FRAMES} frames"),
        ));
    }
    Ok(frames as usize)
}

/// Reject NaN and infinities for a named parameter.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> SynthResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SynthError::invalid_param(name, format!("{value} is not finite")))
    }
}
