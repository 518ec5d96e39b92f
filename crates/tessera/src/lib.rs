#![forbid(unsafe_code)]

//! # Tessera
//!
//! Facade crate for decoding audio dataset columns.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::num::NonZeroU32;
//!
//! use tessera::prelude::*;
//!
//! let audio = Audio::new(
//!     AudioFeatureConfig::default()
//!         .with_sampling_rate(NonZeroU32::new(16000).unwrap())
//!         .with_mono(true),
//! );
//! let item = audio.decode_example(&StoredAudioReference::path_only("speech.flac"))?;
//! println!("{} frames at {} Hz", item.array.frames(), item.sampling_rate);
//! # Ok::<(), tessera::audio::AudioError>(())
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod audio {
    pub use tessera_audio::*;
}

pub mod decode {
    pub use tessera_decode::*;
}

// ── Prelude ─────────────────────────────────────────────────────────────

pub mod prelude {
    pub use tessera_audio::{
        Audio, AudioArray, AudioError, AudioFeatureConfig, AudioResult, Backends, Capability,
        DecodedAudio, DecodedBatch, FeatureSpec, StoredAudioReference,
    };
    pub use tessera_decode::{DecodeError, DecodeResult, PlanarPcm, ResamplerQuality};
}
