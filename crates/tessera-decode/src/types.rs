use std::fmt;

use crate::error::{DecodeError, DecodeResult};

/// PCM specification - core audio format information
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcmSpec {
    pub sample_rate: u32,
    pub channels: u16,
}

impl fmt::Display for PcmSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz, {} channels", self.sample_rate, self.channels)
    }
}

/// Channel-last PCM: one frame after another, samples interleaved (LRLRLR...).
///
/// # Invariants
/// - `pcm.len() % channels == 0` (frame-aligned)
/// - `spec.channels > 0`
#[derive(Clone, Debug, PartialEq)]
pub struct InterleavedPcm {
    pub spec: PcmSpec,
    pub pcm: Vec<f32>,
}

impl InterleavedPcm {
    pub fn new(spec: PcmSpec, pcm: Vec<f32>) -> Self {
        Self { spec, pcm }
    }

    /// Number of audio frames
    ///
    /// A frame contains one sample per channel
    pub fn frames(&self) -> usize {
        let channels = self.spec.channels as usize;
        if channels == 0 {
            0
        } else {
            self.pcm.len() / channels
        }
    }

    /// Check if the PCM data is frame-aligned (length is divisible by channel count)
    pub fn is_frame_aligned(&self) -> bool {
        self.spec.channels != 0 && self.pcm.len() % self.spec.channels as usize == 0
    }

    /// Transpose to channel-major layout.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidData`] if the buffer is not frame-aligned.
    pub fn into_planar(self) -> DecodeResult<PlanarPcm> {
        if !self.is_frame_aligned() {
            return Err(DecodeError::InvalidData(format!(
                "{} samples do not divide into {} channels",
                self.pcm.len(),
                self.spec.channels
            )));
        }

        let channels = self.spec.channels as usize;
        let frames = self.frames();
        let mut planar = vec![Vec::with_capacity(frames); channels];
        for frame in self.pcm.chunks_exact(channels) {
            for (channel, sample) in planar.iter_mut().zip(frame) {
                channel.push(*sample);
            }
        }

        Ok(PlanarPcm {
            sample_rate: self.spec.sample_rate,
            channels: planar,
        })
    }
}

/// Channel-major PCM: one `Vec` per channel, all of equal length.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanarPcm {
    pub sample_rate: u32,
    pub channels: Vec<Vec<f32>>,
}

impl PlanarPcm {
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Rate and channel count as a [`PcmSpec`].
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidData`] if there are more than
    /// `u16::MAX` channels.
    pub fn spec(&self) -> DecodeResult<PcmSpec> {
        let channels = u16::try_from(self.channels.len()).map_err(|_| {
            DecodeError::InvalidData(format!("{} channels exceed u16", self.channels.len()))
        })?;
        Ok(PcmSpec {
            sample_rate: self.sample_rate,
            channels,
        })
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.frames() as f64 / self.sample_rate as f64
        }
    }

    /// Check that every channel holds the same number of frames.
    pub fn is_rectangular(&self) -> bool {
        let frames = self.frames();
        self.channels.iter().all(|c| c.len() == frames)
    }
}
