//! Batch decoding over real files.

use std::num::NonZeroU32;

use rstest::rstest;
use tempfile::TempDir;
use tessera::prelude::*;

use crate::common::{stereo_sine, temp_dir, tracing_setup, wav_file};

fn column(temp_dir: &TempDir, rates: &[u32]) -> Vec<StoredAudioReference> {
    rates
        .iter()
        .enumerate()
        .map(|(i, &rate)| {
            let frames = rate as usize / 10;
            let path = wav_file(temp_dir, &format!("{i}.wav"), &stereo_sine(frames, rate), rate);
            StoredAudioReference::path_only(path.to_str().unwrap())
        })
        .collect()
}

#[rstest]
fn native_rates_in_input_order(#[from(tracing_setup)] _tracing: (), temp_dir: TempDir) {
    let references = column(&temp_dir, &[22050, 8000, 44100]);
    let audio = Audio::new(AudioFeatureConfig::default());

    let batch = audio.decode_batch(&references).unwrap();

    let paths: Vec<&str> = references.iter().map(StoredAudioReference::path).collect();
    assert_eq!(batch.path, paths);
    assert_eq!(batch.sampling_rate, vec![22050, 8000, 44100]);
    let frames: Vec<usize> = batch.array.iter().map(AudioArray::frames).collect();
    assert_eq!(frames, vec![2205, 800, 4410]);
}

#[rstest]
fn common_target_rate(temp_dir: TempDir) {
    let references = column(&temp_dir, &[22050, 8000, 44100, 22050]);
    let audio = Audio::new(
        AudioFeatureConfig::default()
            .with_sampling_rate(NonZeroU32::new(16000).unwrap())
            .with_mono(false),
    );

    let batch = audio.decode_batch(&references).unwrap();

    assert_eq!(batch.sampling_rate, vec![16000; 4]);
    assert!(batch.array.iter().all(|a| a.channel_count() == 2 && a.frames() == 1600));
    // One kernel per source rate
    assert_eq!(audio.cached_resamplers(), 3);
}

#[rstest]
fn missing_item_fails_whole_batch(temp_dir: TempDir) {
    let mut references = column(&temp_dir, &[8000, 8000]);
    references.insert(1, StoredAudioReference::path_only("/nonexistent/gone.wav"));
    let audio = Audio::new(AudioFeatureConfig::default());

    let err = audio.decode_batch(&references).unwrap_err();
    assert!(matches!(err, AudioError::Decode(_)));
}

#[rstest]
fn batch_serializes_as_columns(temp_dir: TempDir) {
    let references = column(&temp_dir, &[8000]);
    let audio = Audio::new(AudioFeatureConfig::default());

    let batch = audio.decode_batch(&references).unwrap();
    let value = serde_json::to_value(&batch).unwrap();

    assert_eq!(value["sampling_rate"], serde_json::json!([8000]));
    assert_eq!(value["array"][0].as_array().unwrap().len(), 800);
}
