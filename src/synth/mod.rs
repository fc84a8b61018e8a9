// Purpose: memoized voices, mixing, and the session-facing Synth
// This layer sits above the block DSP and below the output sinks

pub mod cache;
pub mod generator;
pub mod mixer;

use crate::{
    config::SessionConfig,
    dsp::waveform::Waveform,
    error::{SynthError, SynthResult},
    io::OutputSink,
    runtime::StopSignal,
};

use self::{generator::Generator, mixer::mix_voices};

/// One rendering session: a generator, a sample rate and the sink they feed.
///
/// Scores receive a `&mut Synth` and call `play` / `play_mix`. Every call
/// renders the whole mix, then hands it to the sink before returning.
pub struct Synth<S: OutputSink> {
    generator: Generator,
    sample_rate: u32,
    sink: S,
    stop: StopSignal,
}

impl<S: OutputSink> Synth<S> {
    pub fn new(sink: S, config: &SessionConfig) -> Self {
        Self::with_stop(sink, config, StopSignal::new())
    }

    pub fn with_stop(sink: S, config: &SessionConfig, stop: StopSignal) -> Self {
        Self {
            generator: Generator::new(config.noise_seed),
            sample_rate: config.sample_rate,
            sink,
            stop,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn stop_signal(&self) -> &StopSignal {
        &self.stop
    }

    pub fn tone(&mut self, frequency: f64, duration: f64) -> SynthResult<Waveform> {
        self.generator.tone(frequency, duration, self.sample_rate)
    }

    pub fn drum_soft(&mut self, duration: f64) -> SynthResult<Waveform> {
        self.generator.drum_soft(duration, self.sample_rate)
    }

    pub fn drum_hard(&mut self, duration: f64) -> SynthResult<Waveform> {
        self.generator.drum_hard(duration, self.sample_rate)
    }

    pub fn silence(&mut self, duration: f64) -> SynthResult<Waveform> {
        self.generator.silence(duration, self.sample_rate)
    }

    pub fn filtered_noise(&mut self, cutoff: f64, duration: f64) -> SynthResult<Waveform> {
        self.generator
            .filtered_noise(cutoff, duration, self.sample_rate)
    }

    /// Play each waveform as its own voice, all starting together.
    pub fn play(&mut self, waveforms: &[Waveform]) -> SynthResult<()> {
        let voices: Vec<&[Waveform]> = waveforms.iter().map(std::slice::from_ref).collect();
        self.play_mix(voices.as_slice())
    }

    /// Concatenate each voice, sum the voices and send the result to the sink.
    ///
    /// Fails with `ShapeMismatch` before touching the sink if the voices have
    /// different total lengths.
    pub fn play_mix<V>(&mut self, voices: &[V]) -> SynthResult<()>
    where
        V: AsRef<[Waveform]>,
    {
        self.check_stop()?;
        mixer::check_sample_rate(voices, self.sample_rate)?;
        let mixed = mix_voices(voices)?;
        if mixed.is_empty() {
            log::debug!("empty mix, nothing to play");
            return Ok(());
        }
        log::debug!("playing {} voices, {} frames", voices.len(), mixed.len());
        self.sink.play_wave(&mixed)
    }

    /// Send one waveform straight to the sink.
    pub fn play_wave(&mut self, wave: &Waveform) -> SynthResult<()> {
        self.check_stop()?;
        mixer::check_sample_rate(&[std::slice::from_ref(wave)], self.sample_rate)?;
        self.sink.play_wave(wave)
    }

    fn check_stop(&self) -> SynthResult<()> {
        if self.stop.is_triggered() {
            Err(SynthError::Interrupted)
        } else {
            Ok(())
        }
    }
}
