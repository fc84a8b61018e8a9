//! Error types shared by the synthesis pipeline and the output sinks.

use thiserror::Error;

/// Result type for synthesis and rendering operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors surfaced by generators, the mixer and the rendering session.
#[derive(Debug, Error)]
pub enum SynthError {
    /// A generator or envelope was asked for something it cannot produce.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// Voices in a mix flattened to different lengths.
    #[error("voice {voice} has {found} frames, expected {expected}")]
    ShapeMismatch {
        /// Index of the first offending voice.
        voice: usize,
        /// Length of voice 0.
        expected: usize,
        /// Length of the offending voice.
        found: usize,
    },

    /// The destination failed.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Rendering was stopped from outside. Sessions treat this as a clean stop.
    #[error("rendering interrupted")]
    Interrupted,
}

impl SynthError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

/// Destination-specific failures.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("no default output device available")]
    NoDevice,

    #[error("failed to query output device config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("wav encoding failed: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `play_wave` was called after the sink was finished.
    #[error("sink already finished")]
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_param_mentions_name_and_reason() {
        let err = SynthError::invalid_param("duration", "must be positive");
        let text = err.to_string();
        assert!(text.contains("duration"));
        assert!(text.contains("must be positive"));
    }

    #[test]
    fn shape_mismatch_reports_lengths() {
        let err = SynthError::ShapeMismatch {
            voice: 1,
            expected: 100,
            found: 50,
        };
        assert_eq!(err.to_string(), "voice 1 has 50 frames, expected 100");
    }

    #[test]
    fn sink_errors_convert() {
        let err: SynthError = SinkError::NoDevice.into();
        assert!(matches!(err, SynthError::Sink(SinkError::NoDevice)));
    }
}
