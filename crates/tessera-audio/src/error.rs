use std::fmt;

use tessera_decode::DecodeError;
use thiserror::Error;

use crate::reference::ReferenceKind;

/// Decode capability the dispatcher may need for a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    PathDecoder,
    BufferDecoder,
    Mp3Decoder,
    Resampler,
    MonoMixer,
}

impl Capability {
    /// What to do to make the capability available.
    pub fn hint(self) -> &'static str {
        match self {
            Self::PathDecoder => "install a path decoder with Backends::with_path_decoder",
            Self::BufferDecoder => "install a buffer decoder with Backends::with_buffer_decoder",
            Self::Mp3Decoder => {
                "enable the `mp3` cargo feature or install one with Backends::with_mp3_decoder"
            }
            Self::Resampler => {
                "install a resampler with Backends::with_resampler, or leave sampling_rate unset"
            }
            Self::MonoMixer => {
                "install a mono mixer with Backends::with_mono_mixer, or set mono to false"
            }
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PathDecoder => "path decoder",
            Self::BufferDecoder => "buffer decoder",
            Self::Mp3Decoder => "mp3 decoder",
            Self::Resampler => "resampler",
            Self::MonoMixer => "mono mixer",
        };
        f.write_str(name)
    }
}

/// Errors produced while decoding audio column items.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("{capability} is not available: {}", .capability.hint())]
    BackendUnavailable { capability: Capability },

    #[error("malformed reference: column stores {expected} references, got {found}")]
    MalformedReference {
        expected: ReferenceKind,
        found: ReferenceKind,
    },

    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
}

/// Result type for audio feature operations.
pub type AudioResult<T> = Result<T, AudioError>;
