//! Audio feature configuration and its serialized declaration.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Configuration of one audio column.
///
/// The value is immutable once a column is declared: `archived` fixes the
/// storage schema and the shape of every stored reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioFeatureConfig {
    /// Target output rate. `None` keeps the native rate of each file.
    #[serde(default)]
    pub sampling_rate: Option<NonZeroU32>,
    /// Downmix decoded audio to a single channel.
    #[serde(default = "default_mono")]
    pub mono: bool,
    /// References carry the file bytes next to the path.
    #[serde(default)]
    pub archived: bool,
    /// Opaque label, carried through serialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

fn default_mono() -> bool {
    true
}

impl Default for AudioFeatureConfig {
    fn default() -> Self {
        Self {
            sampling_rate: None,
            mono: default_mono(),
            archived: false,
            id: None,
        }
    }
}

impl AudioFeatureConfig {
    /// Set target sampling rate.
    pub fn with_sampling_rate(mut self, rate: NonZeroU32) -> Self {
        self.sampling_rate = Some(rate);
        self
    }

    /// Keep the native rate of every file.
    pub fn with_native_rate(mut self) -> Self {
        self.sampling_rate = None;
        self
    }

    /// Enable or disable downmixing to mono.
    pub fn with_mono(mut self, mono: bool) -> Self {
        self.mono = mono;
        self
    }

    /// Select the archived (path + bytes) storage schema.
    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    /// Set the column label.
    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Target rate as a plain integer.
    pub fn target_rate(&self) -> Option<u32> {
        self.sampling_rate.map(NonZeroU32::get)
    }
}

/// Serialized feature declaration, tagged by feature type.
///
/// ```json
/// {"_type": "Audio", "sampling_rate": 16000, "mono": true, "archived": false}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum FeatureSpec {
    Audio(AudioFeatureConfig),
}

impl From<AudioFeatureConfig> for FeatureSpec {
    fn from(config: AudioFeatureConfig) -> Self {
        Self::Audio(config)
    }
}
