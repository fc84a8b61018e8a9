//! Realtime sink feeding the default output device.
//!
//! The synthesis thread pushes samples into a lock-free `rtrb` ring; the cpal
//! callback pops one sample per frame and copies it to every channel. When the
//! ring runs dry the callback writes silence.
//!
//! `play_wave` blocks until the whole block has been queued, so a caller can
//! never get more than one ring's worth ahead of the speaker.

use std::{thread, time::Duration};

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BufferSize, SampleRate, Stream, StreamConfig,
};
use rtrb::{Producer, RingBuffer};

use crate::{
    error::{SinkError, SynthError, SynthResult},
    io::OutputSink,
    runtime::StopSignal,
};

const POLL_INTERVAL: Duration = Duration::from_millis(2);

pub struct DeviceSink {
    // Dropping the stream closes the device.
    stream: Option<Stream>,
    tx: Producer<f32>,
    sample_rate: u32,
    stop: StopSignal,
}

impl DeviceSink {
    /// Open the default output device at `sample_rate`.
    pub fn open(sample_rate: u32, buffer_frames: usize, stop: StopSignal) -> SynthResult<Self> {
        let host = cpal::default_host();
        log::info!("cpal host: {}", host.id().name());
        let device = host.default_output_device().ok_or(SinkError::NoDevice)?;
        match device.name() {
            Ok(name) => log::info!("cpal device: {name}"),
            Err(_) => log::info!("cpal device: (no name)"),
        }

        let default_config = device.default_output_config().map_err(SinkError::from)?;
        let channels = default_config.channels();
        let config = StreamConfig {
            channels,
            sample_rate: SampleRate(sample_rate),
            buffer_size: BufferSize::Default,
        };
        log::info!("sample rate: {sample_rate}, channels: {channels}");

        let (tx, mut rx) = RingBuffer::<f32>::new(buffer_frames);
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for frame in data.chunks_mut(channels as usize) {
                        let s = rx.pop().unwrap_or(0.0);
                        frame.fill(s);
                    }
                },
                |err| log::error!("stream error: {err}"),
                None,
            )
            .map_err(SinkError::from)?;
        stream.play().map_err(SinkError::from)?;

        Ok(Self {
            stream: Some(stream),
            tx,
            sample_rate,
            stop,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn queued(&self) -> usize {
        self.tx.buffer().capacity() - self.tx.slots()
    }
}

impl OutputSink for DeviceSink {
    fn play_wave(&mut self, samples: &[f32]) -> SynthResult<()> {
        if self.stream.is_none() {
            return Err(SinkError::Finished.into());
        }
        let mut rest = samples;
        while !rest.is_empty() {
            if self.stop.is_triggered() {
                return Err(SynthError::Interrupted);
            }
            let n = self.tx.slots().min(rest.len());
            if n == 0 {
                thread::sleep(POLL_INTERVAL);
                continue;
            }
            if let Ok(chunk) = self.tx.write_chunk_uninit(n) {
                let written = chunk.fill_from_iter(rest[..n].iter().copied());
                rest = &rest[written..];
            }
        }
        Ok(())
    }

    /// Wait for queued samples to reach the device, then close the stream.
    /// An interrupt skips the wait.
    fn finish(&mut self) -> SynthResult<()> {
        if self.stream.is_none() {
            return Ok(());
        }
        while self.queued() > 0 && !self.stop.is_triggered() {
            thread::sleep(POLL_INTERVAL);
        }
        self.stream = None;
        log::debug!("output stream closed");
        Ok(())
    }
}
