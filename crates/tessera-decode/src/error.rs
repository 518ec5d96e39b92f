//! Error types for audio decoding.

use std::io;

use thiserror::Error;

/// Errors that can occur while decoding, resampling or mixing audio.
///
/// This error type is backend-agnostic, wrapping decoder-specific errors
/// in the `Backend` variant.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("No supported audio track found")]
    NoAudioTrack,

    #[error("Unsupported codec: {0}")]
    UnsupportedCodec(String),

    #[error("Resampler error: {0}")]
    Resample(String),

    #[error("Decoder error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

impl From<rubato::ResampleError> for DecodeError {
    fn from(err: rubato::ResampleError) -> Self {
        Self::Resample(err.to_string())
    }
}

impl From<rubato::ResamplerConstructionError> for DecodeError {
    fn from(err: rubato::ResamplerConstructionError) -> Self {
        Self::Resample(err.to_string())
    }
}
