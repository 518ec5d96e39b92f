// Common fixtures and utilities for integration tests

use std::path::PathBuf;

use tempfile::TempDir;
pub use tessera_test_utils::*;

/// Stereo 440 Hz sine, 0.5 peak on the left and 0.3 on the right.
///
/// The channel average is the same sine with a 0.4 peak.
pub fn stereo_sine(frames: usize, sample_rate: u32) -> Vec<Vec<f32>> {
    vec![
        sine(frames, sample_rate, 440.0, 0.5),
        sine(frames, sample_rate, 440.0, 0.3),
    ]
}

/// Write `channels` as a 16-bit WAV file named `name` inside `dir`.
pub fn wav_file(dir: &TempDir, name: &str, channels: &[Vec<f32>], sample_rate: u32) -> PathBuf {
    write_fixture(dir, name, &create_wav_from_planar(channels, sample_rate))
}

/// Peak absolute sample value.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
}
