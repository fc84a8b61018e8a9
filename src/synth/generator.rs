//! Memoized instrument voices.
//!
//! A [`Generator`] owns the waveform cache and the noise seed for one
//! session. Every voice is a pure function of its parameters and the seed, so
//! repeated requests return the stored waveform without recomputation.
//!
//! # Voices
//!
//! - `tone` - additive synthesis of a fixed harmonic table under a soft ADSR
//! - `drum_soft` - low-passed noise burst (1 kHz) with a fast envelope
//! - `drum_hard` - 20 Hz square thump plus brighter noise (4 kHz), held longer
//! - `silence` - rests for sequencers

use crate::{
    dsp::{
        envelope::Adsr,
        noise::{lowpass_noise, NoiseSpec},
        oscillator,
        waveform::{frame_count, Waveform},
    },
    error::SynthResult,
    synth::cache::{CacheKey, WaveformCache},
};

/// (frequency multiplier, amplitude multiplier) pairs summed by `tone`.
pub const HARMONICS: [(f64, f64); 5] = [
    (1.0, 0.5),
    (1.01, 0.3),
    (0.2, 0.3),
    (0.5, 0.2),
    (0.25, 0.1),
];

/// Amplitude every harmonic multiplier scales.
pub const TONE_AMPLITUDE: f64 = 0.5;

pub const TONE_ENVELOPE: Adsr = Adsr::new(0.1, 0.2, 0.6, 0.2);
pub const DRUM_SOFT_ENVELOPE: Adsr = Adsr::new(0.01, 0.1, 0.1, 0.4);
pub const DRUM_HARD_ENVELOPE: Adsr = Adsr::new(0.1, 0.1, 1.0, 0.7);

/// Length of the shared noise buffers drums slice from, in seconds.
pub const NOISE_SOURCE_SECONDS: f64 = 10.0;

const DRUM_SOFT_CUTOFF: f64 = 1_000.0;
const DRUM_SOFT_GAIN: f32 = 48.0;
const DRUM_HARD_CUTOFF: f64 = 4_000.0;
const DRUM_HARD_THUMP_HZ: f64 = 20.0;
const DRUM_HARD_THUMP_GAIN: f64 = 0.2;

#[derive(Debug, Default)]
pub struct Generator {
    cache: WaveformCache,
    noise_seed: u64,
}

impl Generator {
    pub fn new(noise_seed: u64) -> Self {
        Self {
            cache: WaveformCache::new(),
            noise_seed,
        }
    }

    pub fn cache(&self) -> &WaveformCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut WaveformCache {
        &mut self.cache
    }

    pub fn noise_seed(&self) -> u64 {
        self.noise_seed
    }

    /// Additive tone: the harmonic table summed over a zero seed, then shaped
    /// by [`TONE_ENVELOPE`].
    pub fn tone(
        &mut self,
        frequency: f64,
        duration: f64,
        sample_rate: u32,
    ) -> SynthResult<Waveform> {
        self.cache
            .get_or_compute(CacheKey::tone(frequency, duration, sample_rate), || {
                render_tone(frequency, duration, sample_rate)
            })
    }

    /// Gaussian noise with every bin above `cutoff` zeroed.
    pub fn filtered_noise(
        &mut self,
        cutoff: f64,
        duration: f64,
        sample_rate: u32,
    ) -> SynthResult<Waveform> {
        let seed = self.noise_seed;
        self.cache
            .get_or_compute(CacheKey::noise(cutoff, duration, sample_rate), || {
                lowpass_noise(&NoiseSpec::new(cutoff, duration, sample_rate), seed)
            })
    }

    /// Soft drum: a slice of the 1 kHz noise source under a short envelope.
    pub fn drum_soft(&mut self, duration: f64, sample_rate: u32) -> SynthResult<Waveform> {
        self.memoize(CacheKey::drum_soft(duration, sample_rate), |gen| {
            let frames = frame_count(duration, sample_rate)?;
            let source = gen.filtered_noise(DRUM_SOFT_CUTOFF, NOISE_SOURCE_SECONDS, sample_rate)?;
            let mut samples: Vec<f32> = source
                .head(frames)?
                .iter()
                .map(|&s| s * DRUM_SOFT_GAIN)
                .collect();
            DRUM_SOFT_ENVELOPE.apply(&mut samples)?;
            Ok(Waveform::new(samples, sample_rate))
        })
    }

    /// Hard drum: a 20 Hz square thump plus a slice of the 4 kHz noise
    /// source, under a long sustained envelope.
    pub fn drum_hard(&mut self, duration: f64, sample_rate: u32) -> SynthResult<Waveform> {
        self.memoize(CacheKey::drum_hard(duration, sample_rate), |gen| {
            let thump = oscillator::square(
                duration,
                DRUM_HARD_THUMP_HZ,
                DRUM_HARD_THUMP_GAIN,
                sample_rate,
            )?;
            let source = gen.filtered_noise(DRUM_HARD_CUTOFF, NOISE_SOURCE_SECONDS, sample_rate)?;
            let noise = source.head(thump.len())?;

            let mut samples: Vec<f32> =
                thump.iter().zip(noise.iter()).map(|(t, n)| t + n).collect();
            DRUM_HARD_ENVELOPE.apply(&mut samples)?;
            Ok(Waveform::new(samples, sample_rate))
        })
    }

    pub fn silence(&mut self, duration: f64, sample_rate: u32) -> SynthResult<Waveform> {
        self.cache
            .get_or_compute(CacheKey::silence(duration, sample_rate), || {
                oscillator::silence(duration, sample_rate)
            })
    }

    /// Like `WaveformCache::get_or_compute`, for voices built from other
    /// memoized voices.
    fn memoize<F>(&mut self, key: CacheKey, generate: F) -> SynthResult<Waveform>
    where
        F: FnOnce(&mut Self) -> SynthResult<Waveform>,
    {
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let wave = generate(self)?;
        self.cache.insert(key, wave.clone());
        Ok(wave)
    }
}

fn render_tone(frequency: f64, duration: f64, sample_rate: u32) -> SynthResult<Waveform> {
    let seed = oscillator::sine(duration, 0.0, 0.0, sample_rate)?;
    let mut acc = seed.to_vec();

    for (freq_mult, amp_mult) in HARMONICS {
        let partial = oscillator::sine(
            duration,
            frequency * freq_mult,
            TONE_AMPLITUDE * amp_mult,
            sample_rate,
        )?;
        for (a, p) in acc.iter_mut().zip(partial.iter()) {
            *a += p;
        }
    }

    TONE_ENVELOPE.apply(&mut acc)?;
    Ok(Waveform::new(acc, sample_rate))
}
