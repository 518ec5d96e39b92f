//! Injected decode capabilities.

use std::{fmt, sync::Arc};

#[cfg(feature = "mp3")]
use tessera_decode::SymphoniaMp3Decoder;
use tessera_decode::{
    AverageMixer, BufferDecoder, MonoMixer, Mp3Decoder, PathDecoder, ResamplerFactory,
    SincResampler, SymphoniaBufferDecoder, SymphoniaPathDecoder,
};

use crate::error::{AudioError, AudioResult, Capability};

/// One optional slot per decode capability.
///
/// A missing slot is only reported when an item actually needs it, so a
/// column of WAV files decodes fine without an MP3 decoder installed.
#[derive(Clone)]
pub struct Backends {
    path: Option<Arc<dyn PathDecoder>>,
    buffer: Option<Arc<dyn BufferDecoder>>,
    mp3: Option<Arc<dyn Mp3Decoder>>,
    resampler: Option<Arc<dyn ResamplerFactory>>,
    mixer: Option<Arc<dyn MonoMixer>>,
}

impl Backends {
    /// No capabilities at all.
    pub fn empty() -> Self {
        Self {
            path: None,
            buffer: None,
            mp3: None,
            resampler: None,
            mixer: None,
        }
    }

    /// Symphonia decoders, rubato resampling and channel averaging.
    ///
    /// The MP3 slot is filled only when the `mp3` feature is enabled.
    pub fn symphonia() -> Self {
        #[cfg_attr(not(feature = "mp3"), allow(unused_mut))]
        let mut backends = Self::empty()
            .with_path_decoder(SymphoniaPathDecoder::default())
            .with_buffer_decoder(SymphoniaBufferDecoder::default())
            .with_resampler(SincResampler::default())
            .with_mono_mixer(AverageMixer);

        #[cfg(feature = "mp3")]
        {
            backends = backends.with_mp3_decoder(SymphoniaMp3Decoder::default());
        }

        backends
    }

    pub fn with_path_decoder<D: PathDecoder + 'static>(mut self, decoder: D) -> Self {
        self.path = Some(Arc::new(decoder));
        self
    }

    pub fn with_buffer_decoder<D: BufferDecoder + 'static>(mut self, decoder: D) -> Self {
        self.buffer = Some(Arc::new(decoder));
        self
    }

    pub fn with_mp3_decoder<D: Mp3Decoder + 'static>(mut self, decoder: D) -> Self {
        self.mp3 = Some(Arc::new(decoder));
        self
    }

    pub fn with_resampler<R: ResamplerFactory + 'static>(mut self, resampler: R) -> Self {
        self.resampler = Some(Arc::new(resampler));
        self
    }

    pub fn with_mono_mixer<M: MonoMixer + 'static>(mut self, mixer: M) -> Self {
        self.mixer = Some(Arc::new(mixer));
        self
    }

    /// Empty the slot of `capability`.
    pub fn without(mut self, capability: Capability) -> Self {
        match capability {
            Capability::PathDecoder => self.path = None,
            Capability::BufferDecoder => self.buffer = None,
            Capability::Mp3Decoder => self.mp3 = None,
            Capability::Resampler => self.resampler = None,
            Capability::MonoMixer => self.mixer = None,
        }
        self
    }

    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::PathDecoder => self.path.is_some(),
            Capability::BufferDecoder => self.buffer.is_some(),
            Capability::Mp3Decoder => self.mp3.is_some(),
            Capability::Resampler => self.resampler.is_some(),
            Capability::MonoMixer => self.mixer.is_some(),
        }
    }

    pub(crate) fn path_decoder(&self) -> AudioResult<&dyn PathDecoder> {
        require(self.path.as_deref(), Capability::PathDecoder)
    }

    pub(crate) fn buffer_decoder(&self) -> AudioResult<&dyn BufferDecoder> {
        require(self.buffer.as_deref(), Capability::BufferDecoder)
    }

    pub(crate) fn mp3_decoder(&self) -> AudioResult<&dyn Mp3Decoder> {
        require(self.mp3.as_deref(), Capability::Mp3Decoder)
    }

    pub(crate) fn resampler(&self) -> AudioResult<&dyn ResamplerFactory> {
        require(self.resampler.as_deref(), Capability::Resampler)
    }

    pub(crate) fn mono_mixer(&self) -> AudioResult<&dyn MonoMixer> {
        require(self.mixer.as_deref(), Capability::MonoMixer)
    }
}

fn require<T: ?Sized>(slot: Option<&T>, capability: Capability) -> AudioResult<&T> {
    slot.ok_or(AudioError::BackendUnavailable { capability })
}

impl Default for Backends {
    fn default() -> Self {
        Self::symphonia()
    }
}

impl fmt::Debug for Backends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backends")
            .field("path", &self.path.is_some())
            .field("buffer", &self.buffer.is_some())
            .field("mp3", &self.mp3.is_some())
            .field("resampler", &self.resampler.is_some())
            .field("mixer", &self.mixer.is_some())
            .finish()
    }
}
