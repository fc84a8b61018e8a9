//! File-backed sink writing mono 16-bit PCM WAVE.
//!
//! Samples are buffered in memory as `f32` and encoded only when the sink is
//! finished, so the header is written once with the final frame count.

use std::{
    fs::File,
    io::{BufWriter, Seek, Write},
    path::Path,
};

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::{
    error::{SinkError, SynthResult},
    io::OutputSink,
};

pub struct WavSink<W: Write + Seek> {
    writer: Option<W>,
    sample_rate: u32,
    buffer: Vec<f32>,
}

impl WavSink<BufWriter<File>> {
    /// Create (or truncate) `path` and buffer samples for it.
    pub fn create(path: impl AsRef<Path>, sample_rate: u32) -> SynthResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(SinkError::from)?;
        log::info!("writing {} Hz mono wav to {}", sample_rate, path.display());
        Ok(Self::new(BufWriter::new(file), sample_rate))
    }
}

impl<W: Write + Seek> WavSink<W> {
    pub fn new(writer: W, sample_rate: u32) -> Self {
        Self {
            writer: Some(writer),
            sample_rate,
            buffer: Vec::new(),
        }
    }

    pub fn spec(&self) -> WavSpec {
        WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    /// Frames buffered so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn encode(&mut self) -> SynthResult<()> {
        let Some(writer) = self.writer.take() else {
            return Ok(());
        };
        let mut wav = WavWriter::new(writer, self.spec()).map_err(SinkError::from)?;
        for &s in &self.buffer {
            wav.write_sample(quantize(s)).map_err(SinkError::from)?;
        }
        wav.finalize().map_err(SinkError::from)?;
        log::debug!("encoded {} frames", self.buffer.len());
        self.buffer = Vec::new();
        Ok(())
    }
}

impl<W: Write + Seek> OutputSink for WavSink<W> {
    fn play_wave(&mut self, samples: &[f32]) -> SynthResult<()> {
        if self.writer.is_none() {
            return Err(SinkError::Finished.into());
        }
        self.buffer.extend_from_slice(samples);
        Ok(())
    }

    fn finish(&mut self) -> SynthResult<()> {
        self.encode()
    }
}

impl<W: Write + Seek> Drop for WavSink<W> {
    fn drop(&mut self) {
        if self.writer.is_some() {
            if let Err(err) = self.encode() {
                log::warn!("wav sink dropped without finish and failed to encode: {err}");
            }
        }
    }
}

/// Clamp to [-1, 1] and scale to the signed 16-bit range.
#[inline]
pub fn quantize(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;
    use std::io::Cursor;

    #[test]
    fn quantize_clamps_and_rounds() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 32_767);
        assert_eq!(quantize(-1.0), -32_767);
        assert_eq!(quantize(2.5), 32_767);
        assert_eq!(quantize(-7.0), -32_767);
        assert_eq!(quantize(0.5), 16_384);
    }

    #[test]
    fn writes_header_and_samples_on_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");

        let mut sink = WavSink::create(&path, 22_050).unwrap();
        sink.play_wave(&[0.0, 0.5]).unwrap();
        sink.play_wave(&[-0.5, 1.0]).unwrap();
        sink.finish().unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 22_050);
        assert_eq!(spec.bits_per_sample, 16);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0, 16_384, -16_384, 32_767]);
    }

    #[test]
    fn drop_finalizes_unfinished_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dropped.wav");
        {
            let mut sink = WavSink::create(&path, 8_000).unwrap();
            sink.play_wave(&[0.25; 10]).unwrap();
        }
        let reader = WavReader::open(&path).unwrap();
        assert_eq!(reader.len(), 10);
    }

    #[test]
    fn finish_is_idempotent_and_closes() {
        let mut sink = WavSink::new(Cursor::new(Vec::new()), 8_000);
        sink.play_wave(&[0.1]).unwrap();
        sink.finish().unwrap();
        sink.finish().unwrap();
        assert!(sink.play_wave(&[0.1]).is_err());
    }
}
