#![forbid(unsafe_code)]

//! `tessera-decode`
//!
//! Decode backends and signal helpers for the tessera audio feature.
//!
//! Each capability the feature orchestrates is a trait in [`traits`]:
//! path decoding, buffer decoding, MP3 decoding, resampling and mono
//! downmixing. This crate ships one implementation of each:
//!
//! - Symphonia decoders ([`SymphoniaPathDecoder`], [`SymphoniaBufferDecoder`],
//!   [`SymphoniaMp3Decoder`] with the `mp3` feature)
//! - rubato sinc resampling ([`SincResampler`])
//! - channel averaging ([`AverageMixer`])

mod error;
mod mixer;
mod resampler;
mod symphonia;
pub mod traits;
mod types;

pub use error::{DecodeError, DecodeResult};
pub use mixer::AverageMixer;
pub use resampler::{ResamplerParams, ResamplerQuality, SincKernel, SincResampler};
#[cfg(feature = "mp3")]
pub use crate::symphonia::SymphoniaMp3Decoder;
pub use crate::symphonia::{SymphoniaBufferDecoder, SymphoniaConfig, SymphoniaPathDecoder};
pub use traits::{
    BufferDecoder, MonoMixer, Mp3Decoder, PathDecoder, ResampleKernel, ResamplerFactory,
};
#[cfg(any(test, feature = "test-utils"))]
pub use traits::{BufferDecoderMock, MonoMixerMock, Mp3DecoderMock, PathDecoderMock};
pub use types::{InterleavedPcm, PcmSpec, PlanarPcm};
