use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use rand_pcg::Pcg32;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::{
    dsp::waveform::{ensure_finite, frame_count, Waveform},
    error::{SynthError, SynthResult},
};

/*
Band-Limited Noise
==================

White noise has equal energy at every frequency. Percussion wants noise whose
energy stops at some cutoff: a dull thud below 1 kHz, a brighter rattle below
4 kHz. We get it by going through the frequency domain.

Vocabulary
----------

  bin         One complex coefficient of the DFT. For N samples at rate sr,
              bin k sits at k * sr / N Hz.

  mirror      A real signal's spectrum is conjugate symmetric: bin N-k holds
              the negative frequency matching bin k. Its frequency magnitude
              is (N - k) * sr / N.

  cutoff      Highest frequency allowed through. Bins above it are zeroed.

  Nyquist     sr / 2, the highest representable frequency. A cutoff at or
              above it keeps every bin, so the filter does nothing.


The Pipeline
------------

    gaussian noise ──FFT──► spectrum ──zero |f| > cutoff──► spectrum' ──IFFT──► noise

    1. Draw N samples from N(0, σ) with σ = 0.2
    2. Forward FFT (complex, real input)
    3. For every bin, |f| = min(k, N - k) * sr / N; if |f| > cutoff, set it to 0
    4. Inverse FFT, divide by N (rustfft does not normalize), keep the real part

Zeroing a bin and its mirror together keeps the spectrum conjugate symmetric,
so the inverse transform is real up to rounding.

This is an ideal "brick wall" low-pass: no roll-off, no window. The response
has a hard edge, which rings in the time domain, but for noise that is
inaudible and the filter costs two FFTs with no kernel design.


Determinism
-----------

Noise is seeded. The seed is derived from the session seed and the exact
request (cutoff, duration, sample rate) so the same request in the same
session always yields the same samples, and different requests get
independent streams.
*/

/// Standard deviation of the raw white noise.
pub const NOISE_STD_DEV: f64 = 0.2;

/// Parameters of one band-limited noise request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseSpec {
    pub cutoff: f64,
    pub duration: f64,
    pub sample_rate: u32,
}

impl NoiseSpec {
    pub fn new(cutoff: f64, duration: f64, sample_rate: u32) -> Self {
        Self {
            cutoff,
            duration,
            sample_rate,
        }
    }

    fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }
}

/// Render Gaussian noise with all energy above `spec.cutoff` removed.
pub fn lowpass_noise(spec: &NoiseSpec, seed: u64) -> SynthResult<Waveform> {
    ensure_finite("cutoff", spec.cutoff)?;
    if spec.cutoff < 0.0 {
        return Err(SynthError::invalid_param(
            "cutoff",
            format!("must be non-negative, got {}", spec.cutoff),
        ));
    }
    let frames = frame_count(spec.duration, spec.sample_rate)?;
    if spec.cutoff >= spec.nyquist() {
        log::warn!(
            "cutoff {} Hz is at or above Nyquist ({} Hz); noise is left unfiltered",
            spec.cutoff,
            spec.nyquist()
        );
    }

    log::debug!("generating {frames} noise frames");
    let mut rng = Pcg32::seed_from_u64(derive_seed(seed, spec));
    let noise = gaussian(&mut rng, frames, NOISE_STD_DEV)?;

    log::debug!("band-limiting noise to {} Hz", spec.cutoff);
    let filtered = brickwall_lowpass(&noise, spec.cutoff, spec.sample_rate);

    Ok(Waveform::new(
        filtered.into_iter().map(|s| s as f32).collect(),
        spec.sample_rate,
    ))
}

/// Zero every DFT bin above `cutoff` Hz and transform back.
pub fn brickwall_lowpass(signal: &[f64], cutoff: f64, sample_rate: u32) -> Vec<f64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let ifft = planner.plan_fft_inverse(n);

    let mut spectrum: Vec<Complex<f64>> =
        signal.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut spectrum);

    let kept = zero_above(&mut spectrum, cutoff, sample_rate);
    log::debug!("{kept} of {n} bins kept below {cutoff} Hz");

    ifft.process(&mut spectrum);
    let scale = 1.0 / n as f64;
    spectrum.iter().map(|c| c.re * scale).collect()
}

/// Frequency magnitude of bin `k` in an `n` point transform.
#[inline]
pub fn bin_frequency(k: usize, n: usize, sample_rate: u32) -> f64 {
    let folded = k.min(n - k);
    folded as f64 * sample_rate as f64 / n as f64
}

fn zero_above(spectrum: &mut [Complex<f64>], cutoff: f64, sample_rate: u32) -> usize {
    let n = spectrum.len();
    let mut kept = 0;
    for (k, bin) in spectrum.iter_mut().enumerate() {
        if bin_frequency(k, n, sample_rate) > cutoff {
            *bin = Complex::new(0.0, 0.0);
        } else {
            kept += 1;
        }
    }
    kept
}

/// `frames` draws from N(0, std_dev) over the PCG stream.
fn gaussian(rng: &mut Pcg32, frames: usize, std_dev: f64) -> SynthResult<Vec<f64>> {
    let normal = Normal::new(0.0, std_dev)
        .map_err(|err| SynthError::invalid_param("std_dev", err.to_string()))?;
    Ok(rng.sample_iter(normal).take(frames).collect())
}

/// Independent seed for one request, derived from the session seed.
fn derive_seed(base: u64, spec: &NoiseSpec) -> u64 {
    let mut input = Vec::with_capacity(28);
    input.extend_from_slice(&base.to_le_bytes());
    input.extend_from_slice(&spec.cutoff.to_bits().to_le_bytes());
    input.extend_from_slice(&spec.duration.to_bits().to_le_bytes());
    input.extend_from_slice(&spec.sample_rate.to_le_bytes());

    let hash = blake3::hash(&input);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}
