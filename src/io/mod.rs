// Purpose - destinations for finished waveforms

#[cfg(feature = "rtrb")]
pub mod device;
pub mod wav;

#[cfg(feature = "rtrb")]
pub use device::DeviceSink;
pub use wav::WavSink;

use crate::error::{SinkError, SynthResult};

/// A destination for rendered audio: the speaker, a file, a test buffer.
///
/// The synth hands each finished mix to `play_wave` and never asks which
/// kind of sink it is talking to.
pub trait OutputSink {
    /// Consume one block of mono samples at the session sample rate.
    fn play_wave(&mut self, samples: &[f32]) -> SynthResult<()>;

    /// Flush and release the destination. Calling it again is a no-op.
    fn finish(&mut self) -> SynthResult<()> {
        Ok(())
    }
}

/// Allow boxed sinks to be used as sinks (for runtime destination choice)
impl<'a> OutputSink for Box<dyn OutputSink + 'a> {
    fn play_wave(&mut self, samples: &[f32]) -> SynthResult<()> {
        (**self).play_wave(samples)
    }

    fn finish(&mut self) -> SynthResult<()> {
        (**self).finish()
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn play_wave(&mut self, samples: &[f32]) -> SynthResult<()> {
        (**self).play_wave(samples)
    }

    fn finish(&mut self) -> SynthResult<()> {
        (**self).finish()
    }
}

/// Keeps every block it is given, in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub buffers: Vec<Vec<f32>>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All blocks joined end to end.
    pub fn samples(&self) -> Vec<f32> {
        self.buffers.iter().flatten().copied().collect()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl OutputSink for MemorySink {
    fn play_wave(&mut self, samples: &[f32]) -> SynthResult<()> {
        if self.finished {
            return Err(SinkError::Finished.into());
        }
        self.buffers.push(samples.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> SynthResult<()> {
        self.finished = true;
        Ok(())
    }
}
