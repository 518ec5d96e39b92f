//! Column-oriented batch decoding.

use serde::Serialize;
use tracing::debug;

use crate::{
    error::AudioResult,
    feature::{Audio, AudioArray, DecodedAudio},
    reference::StoredAudioReference,
};

/// Decoded items transposed into parallel columns aligned by input index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodedBatch {
    pub path: Vec<String>,
    pub array: Vec<AudioArray>,
    pub sampling_rate: Vec<u32>,
}

impl DecodedBatch {
    /// Column names, in output order.
    pub const FIELDS: [&'static str; 3] = ["path", "array", "sampling_rate"];

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            path: Vec::with_capacity(capacity),
            array: Vec::with_capacity(capacity),
            sampling_rate: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, item: DecodedAudio) {
        self.path.push(item.path);
        self.array.push(item.array);
        self.sampling_rate.push(item.sampling_rate);
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Split the columns back into per-item records.
    pub fn into_items(self) -> Vec<DecodedAudio> {
        self.path
            .into_iter()
            .zip(self.array)
            .zip(self.sampling_rate)
            .map(|((path, array), sampling_rate)| DecodedAudio {
                path,
                array,
                sampling_rate,
            })
            .collect()
    }
}

impl Extend<DecodedAudio> for DecodedBatch {
    fn extend<I: IntoIterator<Item = DecodedAudio>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl FromIterator<DecodedAudio> for DecodedBatch {
    fn from_iter<I: IntoIterator<Item = DecodedAudio>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut batch = Self::with_capacity(iter.size_hint().0);
        batch.extend(iter);
        batch
    }
}

impl Audio {
    /// Decode `references` in order into a [`DecodedBatch`].
    ///
    /// Decoding stops at the first failing item and its error is returned;
    /// no partial batch is produced.
    ///
    /// # Errors
    ///
    /// Any error [`Audio::decode_example`] returns for an item.
    pub fn decode_batch<'a, I>(&self, references: I) -> AudioResult<DecodedBatch>
    where
        I: IntoIterator<Item = &'a StoredAudioReference>,
    {
        let batch = references
            .into_iter()
            .map(|reference| self.decode_example(reference))
            .collect::<AudioResult<DecodedBatch>>()?;
        debug!(items = batch.len(), "Decoded batch");
        Ok(batch)
    }
}
