//! Symphonia-based decoder backends.
//!
//! All three backends share one whole-stream decode loop and differ only in
//! where the bytes come from and which sample layout they hand back:
//!
//! - [`SymphoniaPathDecoder`] reads a file and returns channel-major samples.
//! - [`SymphoniaBufferDecoder`] reads a byte buffer and returns interleaved
//!   (channel-last) samples.
//! - [`SymphoniaMp3Decoder`] reads MP3 from either and returns channel-major
//!   samples. Requires the `mp3` feature.
//!
//! None of them resample; a target rate hint is ignored and the native rate
//! is reported.

use std::{fs::File, io::Cursor, path::Path};

use bytes::Bytes;
use symphonia::core::{
    audio::SampleBuffer,
    codecs::{CODEC_TYPE_NULL, DecoderOptions},
    errors::Error as SymphoniaError,
    formats::FormatOptions,
    io::{MediaSource, MediaSourceStream},
    meta::MetadataOptions,
    probe::Hint,
};
use tracing::{debug, trace};

use crate::{
    error::{DecodeError, DecodeResult},
    traits::{BufferDecoder, PathDecoder},
    types::{InterleavedPcm, PcmSpec, PlanarPcm},
};
#[cfg(feature = "mp3")]
use crate::traits::Mp3Decoder;

/// Configuration for Symphonia-based decoders.
#[derive(Debug, Clone)]
pub struct SymphoniaConfig {
    /// Enable data verification (slower but safer).
    pub verify: bool,
    /// Trim encoder delay and padding when the format supports it.
    pub gapless: bool,
}

impl Default for SymphoniaConfig {
    fn default() -> Self {
        Self {
            verify: false,
            gapless: true,
        }
    }
}

// ────────────────────────────────── Decode loop ──────────────────────────────────

/// Decode an entire media source into interleaved f32 PCM.
///
/// Undecodable packets are skipped, but a stream where they outnumber the
/// packets that decode is rejected with the last decoder error.
fn decode_source(
    source: Box<dyn MediaSource>,
    hint: Option<&str>,
    config: &SymphoniaConfig,
) -> DecodeResult<InterleavedPcm> {
    let mss = MediaSourceStream::new(source, Default::default());

    let mut format_hint = Hint::new();
    if let Some(ext) = hint {
        format_hint.with_extension(ext);
    }

    let format_opts = FormatOptions {
        enable_gapless: config.gapless,
        ..Default::default()
    };
    let detected = symphonia::default::get_probe()
        .format(&format_hint, mss, &format_opts, &MetadataOptions::default())
        .map_err(backend_error)?;
    let mut format = detected.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoAudioTrack)?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let decoder_opts = DecoderOptions {
        verify: config.verify,
    };
    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &decoder_opts)
        .map_err(backend_error)?;

    let mut spec: Option<PcmSpec> = None;
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut pcm = Vec::new();
    let mut decoded_packets = 0usize;
    let mut skipped_packets = 0usize;
    let mut last_error: Option<&'static str> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(backend_error(e)),
        };

        // Skip packets from other tracks
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(err)) => {
                trace!(err, "Skipping undecodable packet");
                skipped_packets += 1;
                last_error = Some(err);
                continue;
            }
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => return Err(backend_error(e)),
        };

        decoded_packets += 1;
        if decoded.frames() == 0 {
            continue;
        }

        let signal_spec = *decoded.spec();
        let packet_spec = PcmSpec {
            sample_rate: signal_spec.rate,
            channels: signal_spec.channels.count() as u16,
        };
        match spec {
            None => spec = Some(packet_spec),
            Some(current) if current != packet_spec => {
                return Err(DecodeError::InvalidData(format!(
                    "stream changed from {current} to {packet_spec}"
                )));
            }
            Some(_) => {}
        }

        let buf = sample_buf
            .get_or_insert_with(|| SampleBuffer::<f32>::new(decoded.capacity() as u64, signal_spec));
        buf.copy_interleaved_ref(decoded);
        pcm.extend_from_slice(buf.samples());
    }

    if skipped_packets > decoded_packets {
        return Err(DecodeError::InvalidData(format!(
            "{skipped_packets} of {} packets undecodable, last error: {}",
            skipped_packets + decoded_packets,
            last_error.unwrap_or("unknown")
        )));
    }

    let spec = match spec {
        Some(spec) => spec,
        None => PcmSpec {
            sample_rate: codec_params
                .sample_rate
                .ok_or_else(|| DecodeError::InvalidData("No sample rate".to_string()))?,
            channels: codec_params
                .channels
                .map(|c| c.count() as u16)
                .ok_or_else(|| DecodeError::InvalidData("No channel layout".to_string()))?,
        },
    };

    let out = InterleavedPcm::new(spec, pcm);
    debug!(%spec, frames = out.frames(), "Decoded stream");
    Ok(out)
}

fn backend_error(err: SymphoniaError) -> DecodeError {
    match err {
        SymphoniaError::IoError(e) => DecodeError::Io(e),
        SymphoniaError::Unsupported(what) => DecodeError::UnsupportedCodec(what.to_string()),
        other => DecodeError::Backend(Box::new(other)),
    }
}

fn extension_hint(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

fn open_file(path: &Path) -> DecodeResult<Box<dyn MediaSource>> {
    let file = File::open(path)?;
    Ok(Box::new(file))
}

// ────────────────────────────────── Backends ──────────────────────────────────

/// General-purpose path decoder (wav, flac, ogg/vorbis, ...).
#[derive(Debug, Clone, Default)]
pub struct SymphoniaPathDecoder {
    config: SymphoniaConfig,
}

impl SymphoniaPathDecoder {
    pub fn new(config: SymphoniaConfig) -> Self {
        Self { config }
    }
}

impl PathDecoder for SymphoniaPathDecoder {
    fn load(&self, path: &Path, target_rate: Option<u32>) -> DecodeResult<PlanarPcm> {
        debug!(path = %path.display(), ?target_rate, "Decoding file");
        let source = open_file(path)?;
        decode_source(source, extension_hint(path), &self.config)?.into_planar()
    }
}

/// General-purpose buffer decoder. Output is interleaved.
#[derive(Debug, Clone, Default)]
pub struct SymphoniaBufferDecoder {
    config: SymphoniaConfig,
}

impl SymphoniaBufferDecoder {
    pub fn new(config: SymphoniaConfig) -> Self {
        Self { config }
    }
}

impl BufferDecoder for SymphoniaBufferDecoder {
    fn read(&self, bytes: Bytes, extension: Option<&str>) -> DecodeResult<InterleavedPcm> {
        debug!(len = bytes.len(), ?extension, "Decoding buffer");
        let source = Box::new(Cursor::new(bytes));
        decode_source(source, extension, &self.config)
    }
}

/// MP3 decoder for paths and byte buffers.
#[cfg(feature = "mp3")]
#[derive(Debug, Clone, Default)]
pub struct SymphoniaMp3Decoder {
    config: SymphoniaConfig,
}

#[cfg(feature = "mp3")]
impl SymphoniaMp3Decoder {
    pub fn new(config: SymphoniaConfig) -> Self {
        Self { config }
    }
}

#[cfg(feature = "mp3")]
impl Mp3Decoder for SymphoniaMp3Decoder {
    fn load_path(&self, path: &Path, target_rate: Option<u32>) -> DecodeResult<PlanarPcm> {
        debug!(path = %path.display(), ?target_rate, "Decoding mp3 file");
        let source = open_file(path)?;
        decode_source(source, Some("mp3"), &self.config)?.into_planar()
    }

    fn load_bytes(&self, bytes: Bytes, target_rate: Option<u32>) -> DecodeResult<PlanarPcm> {
        debug!(len = bytes.len(), ?target_rate, "Decoding mp3 buffer");
        let source = Box::new(Cursor::new(bytes));
        decode_source(source, Some("mp3"), &self.config)?.into_planar()
    }
}

// ────────────────────────────────── Tests ──────────────────────────────────
