use hound::WavReader;
use rustfft::{num_complex::Complex, FftPlanner};
use saavy_synth::{
    dsp::{envelope::Adsr, oscillator::sine},
    io::{MemorySink, WavSink},
    runtime::{run, with_session, Destination, Outcome, StopSignal},
    SessionConfig, Synth, SynthError,
};

#[test]
fn repeated_tone_is_served_from_cache() {
    let config = SessionConfig::default();
    let mut synth = Synth::new(MemorySink::new(), &config);

    let first = synth.tone(440.0, 0.5).unwrap();
    let second = synth.tone(440.0, 0.5).unwrap();

    assert!(first.ptr_eq(&second));
    assert_eq!(first.len(), 22_050);
    let stats = synth.generator().cache().stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));
}

#[test]
fn noise_is_transformed_once_per_key() {
    let config = SessionConfig::new().with_sample_rate(8_000);
    let mut synth = Synth::new(MemorySink::new(), &config);

    let a = synth.filtered_noise(1_000.0, 1.0).unwrap();
    let b = synth.filtered_noise(1_000.0, 1.0).unwrap();
    assert!(a.ptr_eq(&b));
    assert_eq!(synth.generator().cache().stats().misses, 1);

    let c = synth.filtered_noise(2_000.0, 1.0).unwrap();
    assert!(!a.ptr_eq(&c));
    assert_eq!(synth.generator().cache().stats().misses, 2);
}

#[test]
fn filtered_noise_has_no_energy_above_cutoff() {
    let sample_rate = 16_000;
    let cutoff = 2_500.0;
    let config = SessionConfig::new().with_sample_rate(sample_rate).with_noise_seed(99);
    let mut synth = Synth::new(MemorySink::new(), &config);
    let noise = synth.filtered_noise(cutoff, 0.75).unwrap();

    let n = noise.len();
    let mut spectrum: Vec<Complex<f64>> =
        noise.iter().map(|&s| Complex::new(s as f64, 0.0)).collect();
    FftPlanner::<f64>::new().plan_fft_forward(n).process(&mut spectrum);

    let mut below = 0.0;
    let mut above = 0.0;
    for (k, bin) in spectrum.iter().enumerate() {
        let freq = k.min(n - k) as f64 * sample_rate as f64 / n as f64;
        if freq > cutoff {
            above += bin.norm_sqr();
        } else {
            below += bin.norm_sqr();
        }
    }
    assert!(above / below < 1e-10, "energy ratio {}", above / below);
}

#[test]
fn play_mix_adds_and_rejects_mismatches() {
    let config = SessionConfig::new().with_sample_rate(1_000);
    let mut synth = Synth::new(MemorySink::new(), &config);
    let a = sine(0.1, 50.0, 1.0, 1_000).unwrap();
    let b = sine(0.1, 120.0, 0.5, 1_000).unwrap();
    let short = sine(0.05, 50.0, 1.0, 1_000).unwrap();

    synth.play_mix(&[vec![a.clone()], vec![b.clone()]]).unwrap();
    let expected: Vec<f32> = a.iter().zip(b.iter()).map(|(x, y)| x + y).collect();
    assert_eq!(synth.sink().buffers[0], expected);

    let err = synth.play_mix(&[vec![a], vec![short]]).unwrap_err();
    assert!(matches!(
        err,
        SynthError::ShapeMismatch {
            expected: 100,
            found: 50,
            ..
        }
    ));
    assert_eq!(synth.sink().buffers.len(), 1);
}

#[test]
fn concatenation_keeps_segment_order() {
    let config = SessionConfig::new().with_sample_rate(1_000);
    let mut synth = Synth::new(MemorySink::new(), &config);
    let a = synth.tone(100.0, 0.05).unwrap();
    let b = synth.drum_soft(0.03).unwrap();

    synth.play_mix(&[vec![a.clone(), b.clone()]]).unwrap();
    let played = &synth.sink().buffers[0];
    assert_eq!(&played[..50], a.samples());
    assert_eq!(&played[50..], b.samples());
}

#[test]
fn flat_envelope_boundary() {
    let env = Adsr::new(0.0, 0.0, 1.0, 0.0).render(100).unwrap();
    assert_eq!(env, vec![1.0; 100]);
}

#[test]
fn wav_session_round_trips_quantized_mix() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mix.wav");
    let config = SessionConfig::new().with_sample_rate(8_000);

    let mut expected = Vec::new();
    let outcome = run(Destination::File(path.clone()), &config, StopSignal::new(), |synth| {
        for freq in [220.0, 330.0] {
            let tone = synth.tone(freq, 0.125)?;
            let kick = synth.drum_hard(0.125)?;
            expected.extend(tone.iter().zip(kick.iter()).map(|(t, k)| t + k));
            synth.play(&[tone, kick])?;
        }
        Ok(())
    })
    .unwrap();
    assert_eq!(outcome, Outcome::Completed);

    let mut reader = WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_rate, 8_000);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 2_000);
    for (&got, &want) in samples.iter().zip(&expected) {
        let want = (want.clamp(-1.0, 1.0) * 32_767.0).round() as i16;
        assert_eq!(got, want);
    }
}

#[test]
fn interrupted_session_still_finalizes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cut.wav");
    let config = SessionConfig::new().with_sample_rate(4_000);
    let stop = StopSignal::new();

    let sink = WavSink::create(&path, config.sample_rate).unwrap();
    let outcome = with_session(sink, &config, stop.clone(), |synth| {
        for i in 0..10 {
            if i == 3 {
                stop.trigger();
            }
            let drum = synth.drum_soft(0.1)?;
            synth.play(&[drum])?;
        }
        Ok(())
    })
    .unwrap();

    assert_eq!(outcome, Outcome::Interrupted);
    let reader = WavReader::open(&path).unwrap();
    assert_eq!(reader.len(), 3 * 400);
}
