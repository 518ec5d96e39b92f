//! Offline sample rate conversion built on [rubato](https://crates.io/crates/rubato).
//!
//! [`SincResampler`] is the [`ResamplerFactory`]; each [`SincKernel`] it builds
//! converts whole signals for one rate pair. Kernels keep rubato's filter
//! tables alive between calls and are reset before every use, so a cached
//! kernel gives the same output as a fresh one.

use rubato::{
    Resampler as RubatoResampler, SincFixedIn, SincInterpolationParameters,
    SincInterpolationType, WindowFunction,
};
use tracing::{debug, trace};

use crate::{
    error::{DecodeError, DecodeResult},
    traits::{ResampleKernel, ResamplerFactory},
};

const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Quality preset for the sinc resampler.
///
/// Higher quality uses more CPU but produces better audio fidelity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResamplerQuality {
    /// Balanced sinc resampling (64-tap, linear interpolation).
    Normal,
    /// Good sinc resampling (128-tap, linear interpolation).
    Good,
    /// High sinc resampling (256-tap, cubic interpolation).
    #[default]
    High,
}

impl ResamplerQuality {
    fn sinc_params(self) -> SincInterpolationParameters {
        match self {
            Self::Normal => SincInterpolationParameters {
                sinc_len: 64,
                f_cutoff: 0.95,
                interpolation: SincInterpolationType::Linear,
                oversampling_factor: 128,
                window: WindowFunction::BlackmanHarris2,
            },
            Self::Good => SincInterpolationParameters {
                sinc_len: 128,
                f_cutoff: 0.95,
                interpolation: SincInterpolationType::Linear,
                oversampling_factor: 256,
                window: WindowFunction::BlackmanHarris2,
            },
            Self::High => SincInterpolationParameters {
                sinc_len: 256,
                f_cutoff: 0.95,
                interpolation: SincInterpolationType::Cubic,
                oversampling_factor: 256,
                window: WindowFunction::BlackmanHarris2,
            },
        }
    }
}

/// Configuration parameters for [`SincResampler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResamplerParams {
    /// Quality preset controlling the sinc filter.
    pub quality: ResamplerQuality,
    /// Number of input frames per rubato processing block.
    pub chunk_size: usize,
}

impl Default for ResamplerParams {
    fn default() -> Self {
        Self {
            quality: ResamplerQuality::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ResamplerParams {
    /// Set resampling quality preset.
    pub fn with_quality(mut self, quality: ResamplerQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the number of input frames per processing block.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

/// Sinc-interpolating resampler factory.
#[derive(Clone, Copy, Debug, Default)]
pub struct SincResampler {
    params: ResamplerParams,
}

impl SincResampler {
    pub fn new(params: ResamplerParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> ResamplerParams {
        self.params
    }
}

impl ResamplerFactory for SincResampler {
    fn build(
        &self,
        from_rate: u32,
        to_rate: u32,
        channels: usize,
    ) -> DecodeResult<Box<dyn ResampleKernel>> {
        Ok(Box::new(SincKernel::new(
            from_rate, to_rate, channels, self.params,
        )?))
    }
}

/// Resampler for one `(from_rate, to_rate, channels)` triple.
pub struct SincKernel {
    inner: SincFixedIn<f32>,
    from_rate: u32,
    to_rate: u32,
    channels: usize,
}

impl SincKernel {
    /// Create a kernel.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Resample`] if either rate or the channel count
    /// is zero, or rubato rejects the ratio.
    pub fn new(
        from_rate: u32,
        to_rate: u32,
        channels: usize,
        params: ResamplerParams,
    ) -> DecodeResult<Self> {
        if from_rate == 0 || to_rate == 0 {
            return Err(DecodeError::Resample(format!(
                "invalid rate pair {from_rate} -> {to_rate}"
            )));
        }
        if channels == 0 {
            return Err(DecodeError::Resample("no channels to resample".into()));
        }

        // For SincFixedIn, resample_ratio = fs_out / fs_in
        let ratio = to_rate as f64 / from_rate as f64;
        debug!(
            from_rate,
            to_rate,
            channels,
            ratio,
            quality = ?params.quality,
            "Creating resampler"
        );

        let inner = SincFixedIn::<f32>::new(
            ratio,
            1.0,
            params.quality.sinc_params(),
            params.chunk_size.max(1),
            channels,
        )?;

        Ok(Self {
            inner,
            from_rate,
            to_rate,
            channels,
        })
    }

    /// Output length for `input_frames` frames of input, rounded up.
    pub fn expected_frames(&self, input_frames: usize) -> usize {
        (input_frames as u64 * u64::from(self.to_rate)).div_ceil(u64::from(self.from_rate)) as usize
    }
}

impl ResampleKernel for SincKernel {
    fn process(&mut self, input: &[Vec<f32>]) -> DecodeResult<Vec<Vec<f32>>> {
        if input.len() != self.channels {
            return Err(DecodeError::Resample(format!(
                "kernel built for {} channels, got {}",
                self.channels,
                input.len()
            )));
        }

        let frames_in = input.first().map_or(0, Vec::len);
        if input.iter().any(|c| c.len() != frames_in) {
            return Err(DecodeError::Resample("channels differ in length".into()));
        }

        let expected = self.expected_frames(frames_in);
        if frames_in == 0 {
            return Ok(vec![Vec::new(); self.channels]);
        }

        self.inner.reset();
        let delay = self.inner.output_delay();
        let wanted = expected + delay;

        let mut output: Vec<Vec<f32>> = vec![Vec::with_capacity(wanted); self.channels];
        let mut block = self.inner.output_buffer_allocate(true);
        let mut pos = 0;

        // Full blocks
        while frames_in - pos >= self.inner.input_frames_next() {
            let needed = self.inner.input_frames_next();
            let slices: Vec<&[f32]> = input.iter().map(|c| &c[pos..pos + needed]).collect();
            let (used, produced) = self.inner.process_into_buffer(&slices, &mut block, None)?;
            append(&mut output, &block, produced);
            pos += used;
        }

        // Remainder
        if pos < frames_in {
            let slices: Vec<&[f32]> = input.iter().map(|c| &c[pos..]).collect();
            let (_, produced) = self.inner.process_partial_into_buffer(
                Some(slices.as_slice()),
                &mut block,
                None,
            )?;
            append(&mut output, &block, produced);
        }

        // Drain the filter delay line
        while output[0].len() < wanted {
            let (_, produced) = self.inner.process_partial_into_buffer(
                Option::<&[&[f32]]>::None,
                &mut block,
                None,
            )?;
            if produced == 0 {
                break;
            }
            append(&mut output, &block, produced);
        }

        for channel in &mut output {
            channel.drain(..delay.min(channel.len()));
            channel.truncate(expected);
        }

        trace!(
            frames_in,
            frames_out = output[0].len(),
            delay,
            "Resampled signal"
        );
        Ok(output)
    }
}

fn append(output: &mut [Vec<f32>], block: &[Vec<f32>], frames: usize) {
    for (out, buf) in output.iter_mut().zip(block) {
        out.extend_from_slice(&buf[..frames]);
    }
}
