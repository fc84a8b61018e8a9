//! Scoped rendering sessions.
//!
//! A session owns one sink from the moment it is opened until the score
//! returns. The sink is finished on every exit path: normal completion, an
//! error from the score, or an interrupt.

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use crate::{
    config::SessionConfig,
    error::{SynthError, SynthResult},
    io::{OutputSink, WavSink},
    synth::Synth,
};

/// Shared flag an outside party (a Ctrl+C handler) sets to stop rendering.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Where a session sends its audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// The default output device.
    Device,
    /// A mono 16-bit WAVE file.
    File(PathBuf),
}

impl From<Option<PathBuf>> for Destination {
    fn from(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Destination::File(path),
            None => Destination::Device,
        }
    }
}

/// How a session ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Interrupted,
}

/// Run `score` against `sink`, then finish the sink whatever happened.
///
/// An interrupt is a clean stop and comes back as `Ok(Outcome::Interrupted)`.
/// If both the score and `finish` fail, the score's error wins.
pub fn with_session<S, F>(
    sink: S,
    config: &SessionConfig,
    stop: StopSignal,
    score: F,
) -> SynthResult<Outcome>
where
    S: OutputSink,
    F: FnOnce(&mut Synth<S>) -> SynthResult<()>,
{
    config.validate()?;
    let mut synth = Synth::with_stop(sink, config, stop);

    let played = score(&mut synth);
    let finished = synth.sink_mut().finish();

    let stats = synth.generator().cache().stats();
    log::debug!("cache: {} hits, {} misses", stats.hits, stats.misses);

    match played {
        Ok(()) => finished.map(|()| Outcome::Completed),
        Err(SynthError::Interrupted) => {
            log::info!("rendering interrupted, sink released");
            finished.map(|()| Outcome::Interrupted)
        }
        Err(err) => {
            if let Err(finish_err) = finished {
                log::warn!("sink failed to finish after error: {finish_err}");
            }
            Err(err)
        }
    }
}

/// Open the sink for `destination` and run `score` in a session.
pub fn run<F>(
    destination: Destination,
    config: &SessionConfig,
    stop: StopSignal,
    score: F,
) -> SynthResult<Outcome>
where
    F: FnOnce(&mut Synth<Box<dyn OutputSink>>) -> SynthResult<()>,
{
    config.validate()?;
    let sink = open_sink(&destination, config, &stop)?;
    with_session(sink, config, stop, score)
}

fn open_sink(
    destination: &Destination,
    config: &SessionConfig,
    stop: &StopSignal,
) -> SynthResult<Box<dyn OutputSink>> {
    match destination {
        Destination::File(path) => Ok(Box::new(WavSink::create(path, config.sample_rate)?)),
        Destination::Device => open_device(config, stop),
    }
}

#[cfg(feature = "rtrb")]
fn open_device(config: &SessionConfig, stop: &StopSignal) -> SynthResult<Box<dyn OutputSink>> {
    let sink = crate::io::DeviceSink::open(
        config.sample_rate,
        config.device_buffer_frames,
        stop.clone(),
    )?;
    Ok(Box::new(sink))
}

#[cfg(not(feature = "rtrb"))]
fn open_device(_config: &SessionConfig, _stop: &StopSignal) -> SynthResult<Box<dyn OutputSink>> {
    Err(crate::error::SinkError::NoDevice.into())
}
