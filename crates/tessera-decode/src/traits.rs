//! Capability traits implemented by decode backends.
//!
//! Every capability the audio feature needs is a separate trait so that each
//! one can be provided, replaced or left out independently. Backends disagree
//! on sample layout; the layout each trait returns is part of its contract.

use std::path::Path;

use bytes::Bytes;
#[cfg(any(test, feature = "test-utils"))]
use unimock::unimock;

use crate::{
    error::DecodeResult,
    types::{InterleavedPcm, PlanarPcm},
};

/// General-purpose decoder reading directly from the filesystem.
#[cfg_attr(any(test, feature = "test-utils"), unimock(api = PathDecoderMock))]
pub trait PathDecoder: Send + Sync {
    /// Decode the whole file at `path` into channel-major samples.
    ///
    /// `target_rate` is a hint: implementations may resample internally.
    /// The returned `sample_rate` is authoritative either way.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DecodeError`] if the file cannot be read or decoded.
    fn load(&self, path: &Path, target_rate: Option<u32>) -> DecodeResult<PlanarPcm>;
}

/// General-purpose decoder reading from an in-memory byte buffer.
#[cfg_attr(any(test, feature = "test-utils"), unimock(api = BufferDecoderMock))]
pub trait BufferDecoder: Send + Sync {
    /// Decode `bytes` into channel-last (interleaved) samples at the native rate.
    ///
    /// `extension` is a format hint (e.g. `"flac"`), usually taken from the
    /// path the bytes were archived under. `bytes` is a shared handle, so
    /// callers can pass a slice of a larger archive without copying it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DecodeError`] if the buffer cannot be decoded.
    fn read(&self, bytes: Bytes, extension: Option<&str>) -> DecodeResult<InterleavedPcm>;
}

/// MP3-capable decoder accepting either a path or a byte buffer.
#[cfg_attr(any(test, feature = "test-utils"), unimock(api = Mp3DecoderMock))]
pub trait Mp3Decoder: Send + Sync {
    /// Decode the MP3 file at `path` into channel-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DecodeError`] if the file cannot be read or decoded.
    fn load_path(&self, path: &Path, target_rate: Option<u32>) -> DecodeResult<PlanarPcm>;

    /// Decode an in-memory MP3 stream into channel-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DecodeError`] if the buffer cannot be decoded.
    fn load_bytes(&self, bytes: Bytes, target_rate: Option<u32>) -> DecodeResult<PlanarPcm>;
}

/// Builds resampling kernels for a fixed rate pair.
pub trait ResamplerFactory: Send + Sync {
    /// Create a kernel converting `channels` channels from `from_rate` to `to_rate`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DecodeError::Resample`] if the ratio is not supported.
    fn build(
        &self,
        from_rate: u32,
        to_rate: u32,
        channels: usize,
    ) -> DecodeResult<Box<dyn ResampleKernel>>;
}

/// A constructed resampler for one `(from_rate, to_rate, channels)` triple.
///
/// Kernels keep filter state between calls so they can be cached, but
/// [`ResampleKernel::process`] must give the same output for the same input
/// no matter how many times the kernel was used before.
pub trait ResampleKernel: Send {
    /// Resample a complete channel-major signal.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DecodeError::Resample`] if the input has the wrong
    /// channel count or the backend fails.
    fn process(&mut self, input: &[Vec<f32>]) -> DecodeResult<Vec<Vec<f32>>>;
}

/// Downmixes multi-channel audio to a single channel.
#[cfg_attr(any(test, feature = "test-utils"), unimock(api = MonoMixerMock))]
pub trait MonoMixer: Send + Sync {
    /// Mix channel-major `channels` down to one channel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DecodeError::InvalidData`] if the channels differ in length.
    fn to_mono(&self, channels: &[Vec<f32>]) -> DecodeResult<Vec<f32>>;
}
