//! Memoization of generated waveforms.
//!
//! Keys compare floating-point parameters by exact value. Two durations that
//! differ only by rounding (`0.1 + 0.2` vs `0.3`) are different keys and will
//! both be computed. `-0.0` and `0.0` compare equal and share an entry.

use std::collections::HashMap;

use crate::{dsp::waveform::Waveform, error::SynthResult};

/// An `f64` stored by bit pattern so it can be hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Param(u64);

impl Param {
    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        // fold -0.0 onto 0.0 so equal floats give equal keys
        let value = if value == 0.0 { 0.0 } else { value };
        Param(value.to_bits())
    }
}

/// Exact inputs of one memoized generator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Tone {
        frequency: Param,
        duration: Param,
        sample_rate: u32,
    },
    Noise {
        cutoff: Param,
        duration: Param,
        sample_rate: u32,
    },
    DrumSoft {
        duration: Param,
        sample_rate: u32,
    },
    DrumHard {
        duration: Param,
        sample_rate: u32,
    },
    Silence {
        duration: Param,
        sample_rate: u32,
    },
}

impl CacheKey {
    pub fn tone(frequency: f64, duration: f64, sample_rate: u32) -> Self {
        Self::Tone {
            frequency: frequency.into(),
            duration: duration.into(),
            sample_rate,
        }
    }

    pub fn noise(cutoff: f64, duration: f64, sample_rate: u32) -> Self {
        Self::Noise {
            cutoff: cutoff.into(),
            duration: duration.into(),
            sample_rate,
        }
    }

    pub fn drum_soft(duration: f64, sample_rate: u32) -> Self {
        Self::DrumSoft {
            duration: duration.into(),
            sample_rate,
        }
    }

    pub fn drum_hard(duration: f64, sample_rate: u32) -> Self {
        Self::DrumHard {
            duration: duration.into(),
            sample_rate,
        }
    }

    pub fn silence(duration: f64, sample_rate: u32) -> Self {
        Self::Silence {
            duration: duration.into(),
            sample_rate,
        }
    }
}

/// Lookup counters since the cache was created or last cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Unbounded waveform store. Entries live until the cache is dropped or
/// cleared.
///
/// Not synchronized; owned by a single generator.
#[derive(Debug, Default)]
pub struct WaveformCache {
    entries: HashMap<CacheKey, Waveform>,
    stats: CacheStats,
}

impl WaveformCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored waveform for `key`, or run `generate`, store its
    /// result and return it. A failed generation stores nothing.
    pub fn get_or_compute<F>(&mut self, key: CacheKey, generate: F) -> SynthResult<Waveform>
    where
        F: FnOnce() -> SynthResult<Waveform>,
    {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        let wave = generate()?;
        self.insert(key, wave.clone());
        Ok(wave)
    }

    /// Counted lookup.
    pub fn get(&mut self, key: &CacheKey) -> Option<Waveform> {
        match self.entries.get(key) {
            Some(wave) => {
                self.stats.hits += 1;
                Some(wave.clone())
            }
            None => {
                self.stats.misses += 1;
                log::debug!("cache miss: {key:?}");
                None
            }
        }
    }

    pub fn insert(&mut self, key: CacheKey, wave: Waveform) {
        self.entries.insert(key, wave);
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;

    fn wave(value: f32) -> Waveform {
        Waveform::new(vec![value; 4], 8_000)
    }

    #[test]
    fn second_lookup_skips_generator() {
        let mut cache = WaveformCache::new();
        let mut calls = 0;
        let key = CacheKey::tone(440.0, 0.5, 44_100);

        let first = cache
            .get_or_compute(key, || {
                calls += 1;
                Ok(wave(1.0))
            })
            .unwrap();
        let second = cache
            .get_or_compute(key, || {
                calls += 1;
                Ok(wave(2.0))
            })
            .unwrap();

        assert_eq!(calls, 1);
        assert!(first.ptr_eq(&second));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn keys_match_exactly() {
        assert_eq!(CacheKey::tone(440.0, 0.5, 44_100), CacheKey::tone(440.0, 0.5, 44_100));
        assert_ne!(CacheKey::tone(440.0, 0.5, 44_100), CacheKey::tone(440.0, 0.5, 48_000));
        assert_ne!(CacheKey::tone(440.0, 0.1 + 0.2, 44_100), CacheKey::tone(440.0, 0.3, 44_100));
        assert_ne!(CacheKey::drum_soft(0.5, 44_100), CacheKey::drum_hard(0.5, 44_100));
        assert_eq!(CacheKey::noise(-0.0, 1.0, 8_000), CacheKey::noise(0.0, 1.0, 8_000));
    }

    #[test]
    fn failed_generation_is_not_stored() {
        let mut cache = WaveformCache::new();
        let key = CacheKey::silence(0.0, 8_000);
        let result =
            cache.get_or_compute(key, || Err(SynthError::invalid_param("duration", "empty")));
        assert!(result.is_err());
        assert!(!cache.contains(&key));
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_resets_entries_and_stats() {
        let mut cache = WaveformCache::new();
        let key = CacheKey::silence(1.0, 4);
        cache.get_or_compute(key, || Ok(wave(0.0))).unwrap();
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn param_round_trips() {
        assert_eq!(Param::from(0.25).value(), 0.25);
    }
}
