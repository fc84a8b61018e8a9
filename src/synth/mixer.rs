use crate::{
    dsp::waveform::Waveform,
    error::{SynthError, SynthResult},
};

/*
Sequencing and Summing
======================

A mix is a list of voices; a voice is a list of waveforms.

  within a voice    segments are CONCATENATED (played one after another)
  across voices     flattened voices are SUMMED sample by sample

    voice 0:  [ kick ][ rest ][ kick ][ rest ]
    voice 1:  [     tone      ][     tone     ]
              ─────────────────────────────────
    output:   elementwise sum, same length as each voice

Every voice must flatten to the same length. There is no padding and no
truncation: a mismatch is an error and nothing is written.

Summing is plain addition with no gain staging, so voices that each peak
near 1.0 can clip at the sink.
*/

/// Flatten each voice and sum them. An empty mix gives an empty buffer.
pub fn mix_voices<V>(voices: &[V]) -> SynthResult<Vec<f32>>
where
    V: AsRef<[Waveform]>,
{
    let mut lengths = voices
        .iter()
        .map(|voice| voice.as_ref().iter().map(|w| w.len()).sum::<usize>());

    let Some(expected) = lengths.next() else {
        return Ok(Vec::new());
    };
    if let Some((offset, found)) = lengths.enumerate().find(|(_, len)| *len != expected) {
        return Err(SynthError::ShapeMismatch {
            voice: offset + 1,
            expected,
            found,
        });
    }

    let mut out = vec![0.0f32; expected];
    for voice in voices {
        let mut cursor = 0;
        for segment in voice.as_ref() {
            for (o, &s) in out[cursor..cursor + segment.len()].iter_mut().zip(segment.iter()) {
                *o += s;
            }
            cursor += segment.len();
        }
    }
    Ok(out)
}

/// Check that every waveform in the mix was rendered at `sample_rate`.
pub fn check_sample_rate<V>(voices: &[V], sample_rate: u32) -> SynthResult<()>
where
    V: AsRef<[Waveform]>,
{
    for wave in voices.iter().flat_map(|v| v.as_ref()) {
        if wave.sample_rate() != sample_rate {
            return Err(SynthError::invalid_param(
                "sample_rate",
                format!(
                    "waveform rendered at {} Hz in a {sample_rate} Hz session",
                    wave.sample_rate()
                ),
            ));
        }
    }
    Ok(())
}
