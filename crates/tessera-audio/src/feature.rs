//! The audio feature: decode dispatch, resampling and downmix.

use std::{collections::HashMap, fmt, path::Path};

use parking_lot::Mutex;
use serde::Serialize;
use tessera_decode::{PlanarPcm, ResampleKernel};
use tracing::{debug, trace};

use crate::{
    backends::Backends,
    config::{AudioFeatureConfig, FeatureSpec},
    dispatch::{BackendKind, select_backend},
    error::{AudioError, AudioResult},
    reference::{ReferenceKind, StoredAudioReference},
    schema::{StorageSchema, schema},
};

// ────────────────────────────────── Output ──────────────────────────────────

/// Decoded samples of one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AudioArray {
    /// Single downmixed channel.
    Mono(Vec<f32>),
    /// Channel-major samples, one `Vec` per channel.
    Channels(Vec<Vec<f32>>),
}

impl AudioArray {
    /// Number of array dimensions: 1 for mono, 2 for channel-major.
    pub fn ndim(&self) -> usize {
        match self {
            Self::Mono(_) => 1,
            Self::Channels(_) => 2,
        }
    }

    pub fn channel_count(&self) -> usize {
        match self {
            Self::Mono(_) => 1,
            Self::Channels(channels) => channels.len(),
        }
    }

    /// Samples per channel.
    pub fn frames(&self) -> usize {
        match self {
            Self::Mono(samples) => samples.len(),
            Self::Channels(channels) => channels.first().map_or(0, Vec::len),
        }
    }

    pub fn as_mono(&self) -> Option<&[f32]> {
        match self {
            Self::Mono(samples) => Some(samples),
            Self::Channels(_) => None,
        }
    }

    pub fn as_channels(&self) -> Option<&[Vec<f32>]> {
        match self {
            Self::Mono(_) => None,
            Self::Channels(channels) => Some(channels),
        }
    }
}

/// Normalized record for one decoded item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedAudio {
    /// Path of the stored reference, verbatim.
    pub path: String,
    pub array: AudioArray,
    /// Rate of `array` after any resampling.
    pub sampling_rate: u32,
}

// ────────────────────────────────── Feature ──────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ResampleKey {
    from_rate: u32,
    to_rate: u32,
    channels: usize,
}

/// An audio column feature.
///
/// Decodes stored references into [`DecodedAudio`] records using the
/// injected [`Backends`]. Resampling kernels are built on first use for each
/// `(from_rate, to_rate, channels)` triple and kept for later items.
///
/// `Audio` is `Send + Sync`; concurrent decodes on a shared instance are safe.
pub struct Audio {
    config: AudioFeatureConfig,
    backends: Backends,
    resamplers: Mutex<HashMap<ResampleKey, Box<dyn ResampleKernel>>>,
}

impl Audio {
    /// Feature type tag used in serialized declarations.
    pub const TYPE_NAME: &'static str = "Audio";
    /// Kind of value a decoded item is exposed as.
    pub const DTYPE: &'static str = "dict";

    /// Create a feature with the default Symphonia backends.
    pub fn new(config: AudioFeatureConfig) -> Self {
        Self::with_backends(config, Backends::default())
    }

    pub fn with_backends(config: AudioFeatureConfig, backends: Backends) -> Self {
        Self {
            config,
            backends,
            resamplers: Mutex::new(HashMap::new()),
        }
    }

    /// Create a feature from a serialized declaration.
    pub fn from_spec(spec: FeatureSpec) -> Self {
        match spec {
            FeatureSpec::Audio(config) => Self::new(config),
        }
    }

    pub fn config(&self) -> &AudioFeatureConfig {
        &self.config
    }

    pub fn backends(&self) -> &Backends {
        &self.backends
    }

    /// Serializable declaration of this feature.
    pub fn spec(&self) -> FeatureSpec {
        FeatureSpec::Audio(self.config.clone())
    }

    /// Storage schema of the column.
    pub fn storage_schema(&self) -> StorageSchema {
        schema(self.config.archived)
    }

    /// Number of resampling kernels currently cached.
    pub fn cached_resamplers(&self) -> usize {
        self.resamplers.lock().len()
    }

    /// Decode one stored reference.
    ///
    /// # Errors
    ///
    /// - [`AudioError::MalformedReference`] if the reference shape does not
    ///   match the column's `archived` flag. No backend is called.
    /// - [`AudioError::BackendUnavailable`] if a capability the item needs
    ///   is not installed.
    /// - [`AudioError::Decode`] if a backend fails.
    pub fn decode_example(&self, reference: &StoredAudioReference) -> AudioResult<DecodedAudio> {
        self.check_shape(reference)?;

        let path = reference.path();
        let target_rate = self.config.target_rate();
        let kind = select_backend(path, self.config.archived);
        debug!(path, backend = %kind, ?target_rate, "Dispatching decode");

        let pcm = self.decode_raw(kind, reference, target_rate)?;
        debug!(
            path,
            native_rate = pcm.sample_rate,
            channels = pcm.channel_count(),
            frames = pcm.frames(),
            "Decoded item"
        );

        let pcm = match target_rate {
            Some(rate) if rate != pcm.sample_rate => self.resample(pcm, rate)?,
            _ => pcm,
        };

        let sampling_rate = pcm.sample_rate;
        let array = if self.config.mono {
            AudioArray::Mono(self.backends.mono_mixer()?.to_mono(&pcm.channels)?)
        } else {
            AudioArray::Channels(pcm.channels)
        };

        Ok(DecodedAudio {
            path: path.to_owned(),
            array,
            sampling_rate,
        })
    }

    fn check_shape(&self, reference: &StoredAudioReference) -> AudioResult<()> {
        let expected = ReferenceKind::for_archived(self.config.archived);
        let found = reference.kind();
        if expected == found {
            Ok(())
        } else {
            Err(AudioError::MalformedReference { expected, found })
        }
    }

    /// Run the selected backend and bring its output to channel-major layout.
    fn decode_raw(
        &self,
        kind: BackendKind,
        reference: &StoredAudioReference,
        target_rate: Option<u32>,
    ) -> AudioResult<PlanarPcm> {
        let path = reference.path();
        let pcm = match (kind, reference.bytes()) {
            (BackendKind::Mp3, Some(bytes)) => self
                .backends
                .mp3_decoder()?
                .load_bytes(bytes.clone(), target_rate)?,
            (BackendKind::Mp3, None) => self
                .backends
                .mp3_decoder()?
                .load_path(Path::new(path), target_rate)?,
            (BackendKind::Buffer, Some(bytes)) => self
                .backends
                .buffer_decoder()?
                .read(bytes.clone(), reference.extension())?
                .into_planar()?,
            (BackendKind::Buffer, None) => {
                return Err(AudioError::MalformedReference {
                    expected: ReferenceKind::PathWithBytes,
                    found: ReferenceKind::PathOnly,
                });
            }
            (BackendKind::Path, _) => self
                .backends
                .path_decoder()?
                .load(Path::new(path), target_rate)?,
        };
        Ok(pcm)
    }

    fn resample(&self, pcm: PlanarPcm, to_rate: u32) -> AudioResult<PlanarPcm> {
        let factory = self.backends.resampler()?;
        let key = ResampleKey {
            from_rate: pcm.sample_rate,
            to_rate,
            channels: pcm.channel_count(),
        };

        // Taken out of the map while in use so other threads are not blocked.
        let cached = self.resamplers.lock().remove(&key);
        let mut kernel = match cached {
            Some(kernel) => {
                trace!(?key, "Resampler cache hit");
                kernel
            }
            None => {
                trace!(?key, "Resampler cache miss");
                factory.build(key.from_rate, key.to_rate, key.channels)?
            }
        };

        let result = kernel.process(&pcm.channels);
        self.resamplers.lock().insert(key, kernel);

        Ok(PlanarPcm::new(to_rate, result?))
    }
}

impl fmt::Debug for Audio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Audio")
            .field("config", &self.config)
            .field("backends", &self.backends)
            .field("cached_resamplers", &self.cached_resamplers())
            .finish()
    }
}

// ────────────────────────────────── Tests ──────────────────────────────────
