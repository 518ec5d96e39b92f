#![forbid(unsafe_code)]

//! `tessera-audio`
//!
//! An audio column feature for tabular datasets. A column stores one
//! [`StoredAudioReference`] per row: a plain path, or (when archived) the
//! path together with the encoded file bytes. [`Audio`] turns references into
//! [`DecodedAudio`] records of channel-major (or mono) `f32` samples at a
//! known rate, whatever the container format.
//!
//! ## Pipeline
//!
//! 1. [`select_backend`] picks the MP3, buffer or path decoder.
//! 2. Buffer output is transposed to channel-major.
//! 3. Output is resampled when the target rate differs from the decoded rate.
//! 4. Channels are averaged when `mono` is set.
//!
//! Decoders, the resampler and the mixer are injected through [`Backends`];
//! a missing capability is reported as [`AudioError::BackendUnavailable`]
//! when an item needs it.
//!
//! ```no_run
//! use std::num::NonZeroU32;
//!
//! use tessera_audio::{Audio, AudioFeatureConfig, StoredAudioReference};
//!
//! let audio = Audio::new(
//!     AudioFeatureConfig::default().with_sampling_rate(NonZeroU32::new(16000).unwrap()),
//! );
//! let batch = audio.decode_batch(&[
//!     StoredAudioReference::path_only("clips/a.wav"),
//!     StoredAudioReference::path_only("clips/b.mp3"),
//! ])?;
//! assert_eq!(batch.sampling_rate, vec![16000, 16000]);
//! # Ok::<(), tessera_audio::AudioError>(())
//! ```

mod backends;
mod batch;
mod config;
mod dispatch;
mod error;
mod feature;
mod reference;
mod schema;

pub use backends::Backends;
pub use batch::DecodedBatch;
pub use config::{AudioFeatureConfig, FeatureSpec};
pub use dispatch::{BackendKind, select_backend};
pub use error::{AudioError, AudioResult, Capability};
pub use feature::{Audio, AudioArray, DecodedAudio};
pub use reference::{ReferenceKind, StoredAudioReference};
pub use schema::{DataType, Field, StorageSchema, schema};
