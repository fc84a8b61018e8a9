//! Per-session rendering configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{SynthError, SynthResult},
    DEFAULT_SAMPLE_RATE,
};

/// Settings threaded through every component of one rendering session.
///
/// Nothing in the crate reads an ambient sample rate; two sessions with
/// different configs can coexist in one process.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Samples per second for every waveform and the destination.
    pub sample_rate: u32,
    /// Base seed for noise generation. Same seed, same noise.
    pub noise_seed: u64,
    /// Capacity of the ring between the synthesis thread and the device
    /// callback, in frames.
    pub device_buffer_frames: usize,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            noise_seed: 0,
            device_buffer_frames: 8_192,
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_noise_seed(mut self, seed: u64) -> Self {
        self.noise_seed = seed;
        self
    }

    pub fn with_device_buffer_frames(mut self, frames: usize) -> Self {
        self.device_buffer_frames = frames;
        self
    }

    pub fn validate(&self) -> SynthResult<()> {
        if self.sample_rate == 0 {
            return Err(SynthError::invalid_param(
                "sample_rate",
                "must be greater than zero",
            ));
        }
        if self.device_buffer_frames == 0 {
            return Err(SynthError::invalid_param(
                "device_buffer_frames",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
