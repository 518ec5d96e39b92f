//! MP3 decoding through the audio feature with the default backends.

use std::num::NonZeroU32;

use rstest::rstest;
use tempfile::TempDir;
use tessera::prelude::*;

use crate::common::{
    MP3_FRAME_SAMPLES, SILENCE_MP3, SILENCE_MP3_FRAMES, SILENCE_MP3_RATE, corrupt_mp3, temp_dir,
    write_fixture,
};

fn reference(archived: bool, dir: &TempDir, bytes: &[u8]) -> StoredAudioReference {
    if archived {
        StoredAudioReference::with_bytes("clips/silence.mp3", bytes.to_vec())
    } else {
        let path = write_fixture(dir, "silence.mp3", bytes);
        StoredAudioReference::path_only(path.to_str().unwrap())
    }
}

fn decode(config: AudioFeatureConfig, dir: &TempDir) -> DecodedAudio {
    let archived = config.archived;
    Audio::new(config)
        .decode_example(&reference(archived, dir, SILENCE_MP3))
        .unwrap()
}

#[rstest]
#[case::plain(false)]
#[case::archived(true)]
fn silent_mp3_decodes_at_native_rate(#[case] archived: bool, temp_dir: TempDir) {
    let item = decode(
        AudioFeatureConfig::default()
            .with_archived(archived)
            .with_mono(false),
        &temp_dir,
    );

    assert_eq!(item.sampling_rate, SILENCE_MP3_RATE);
    let channels = item.array.as_channels().unwrap();
    assert_eq!(channels.len(), 2);
    // Gapless trimming may drop the decoder delay from the first frames
    let frames = channels[0].len();
    assert!(frames > (SILENCE_MP3_FRAMES - 2) * MP3_FRAME_SAMPLES, "{frames} frames");
    assert!(frames <= SILENCE_MP3_FRAMES * MP3_FRAME_SAMPLES, "{frames} frames");
    assert!(channels.iter().flatten().all(|s| s.abs() < 1e-4));
}

#[rstest]
#[case::plain(false)]
#[case::archived(true)]
fn silent_mp3_is_resampled_to_target(#[case] archived: bool, temp_dir: TempDir) {
    let native = decode(
        AudioFeatureConfig::default().with_archived(archived),
        &temp_dir,
    );
    let resampled = decode(
        AudioFeatureConfig::default()
            .with_archived(archived)
            .with_sampling_rate(NonZeroU32::new(16000).unwrap()),
        &temp_dir,
    );

    assert_eq!(native.sampling_rate, SILENCE_MP3_RATE);
    assert_eq!(resampled.sampling_rate, 16000);

    let native_frames = native.array.frames();
    let expected = (native_frames * 16000).div_ceil(SILENCE_MP3_RATE as usize);
    let mono = resampled.array.as_mono().unwrap();
    assert_eq!(mono.len(), expected);
    assert!(mono.iter().all(|s| s.abs() < 1e-3));
}

#[rstest]
#[case::plain(false)]
#[case::archived(true)]
fn undecodable_mp3_frames_are_decode_error(#[case] archived: bool, temp_dir: TempDir) {
    let audio = Audio::new(AudioFeatureConfig::default().with_archived(archived));

    let err = audio
        .decode_example(&reference(archived, &temp_dir, &corrupt_mp3(200)))
        .unwrap_err();
    assert!(matches!(err, AudioError::Decode(_)), "{err:?}");
}
