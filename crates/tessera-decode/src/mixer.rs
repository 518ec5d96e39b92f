//! Channel mixing (multi-channel to mono).

use crate::{
    error::{DecodeError, DecodeResult},
    traits::MonoMixer,
};

/// Downmix by averaging every frame across channels: `(L + R) / 2` for stereo.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageMixer;

impl MonoMixer for AverageMixer {
    fn to_mono(&self, channels: &[Vec<f32>]) -> DecodeResult<Vec<f32>> {
        let Some(first) = channels.first() else {
            return Ok(Vec::new());
        };
        if channels.len() == 1 {
            return Ok(first.clone());
        }

        let frames = first.len();
        if let Some(bad) = channels.iter().position(|c| c.len() != frames) {
            return Err(DecodeError::InvalidData(format!(
                "channel {bad} has {} frames, expected {frames}",
                channels[bad].len()
            )));
        }

        let count = channels.len() as f32;
        let mono = (0..frames)
            .map(|i| channels.iter().map(|c| c[i]).sum::<f32>() / count)
            .collect();
        Ok(mono)
    }
}
