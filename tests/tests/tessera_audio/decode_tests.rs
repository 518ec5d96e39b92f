//! End-to-end decoding through the default Symphonia backends.

use std::{fs, num::NonZeroU32, sync::Arc, thread};

use rstest::rstest;
use tempfile::TempDir;
use tessera::{
    audio::{Capability, ReferenceKind},
    decode::DecodeError,
    prelude::*,
};

use crate::common::{debug_tracing_setup, peak, stereo_sine, temp_dir, wav_file};

fn rate(hz: u32) -> NonZeroU32 {
    NonZeroU32::new(hz).unwrap()
}

#[rstest]
fn stereo_44k_to_mono_16k(#[from(debug_tracing_setup)] _tracing: (), temp_dir: TempDir) {
    let path = wav_file(&temp_dir, "speech.wav", &stereo_sine(44100, 44100), 44100);
    let audio = Audio::new(
        AudioFeatureConfig::default()
            .with_sampling_rate(rate(16000))
            .with_mono(true),
    );

    let item = audio
        .decode_example(&StoredAudioReference::path_only(path.to_str().unwrap()))
        .unwrap();

    assert_eq!(item.path, path.to_str().unwrap());
    assert_eq!(item.sampling_rate, 16000);
    let mono = item.array.as_mono().unwrap();
    assert_eq!(mono.len(), 16000);

    // Steady-state region, clear of filter edges
    let level = peak(&mono[1000..15000]);
    assert!((level - 0.4).abs() < 0.02, "peak {level}");
}

#[rstest]
fn native_rate_keeps_samples(temp_dir: TempDir) {
    let channels = stereo_sine(2000, 22050);
    let path = wav_file(&temp_dir, "a.wav", &channels, 22050);
    let audio = Audio::new(
        AudioFeatureConfig::default()
            .with_sampling_rate(rate(22050))
            .with_mono(false),
    );

    let item = audio
        .decode_example(&StoredAudioReference::path_only(path.to_str().unwrap()))
        .unwrap();

    assert_eq!(item.sampling_rate, 22050);
    assert_eq!(audio.cached_resamplers(), 0);
    let decoded = item.array.as_channels().unwrap();
    assert_eq!(decoded.len(), 2);
    for (got, want) in decoded.iter().zip(&channels) {
        assert_eq!(got.len(), want.len());
        assert!(got.iter().zip(want).all(|(g, w)| (g - w).abs() < 1e-3));
    }
}

#[rstest]
fn archived_wav_is_channel_major(temp_dir: TempDir) {
    let channels = vec![vec![0.25f32; 300], vec![-0.5f32; 300]];
    let path = wav_file(&temp_dir, "clip.wav", &channels, 8000);
    let bytes = fs::read(&path).unwrap();

    let audio = Audio::new(
        AudioFeatureConfig::default()
            .with_archived(true)
            .with_mono(false),
    );
    let item = audio
        .decode_example(&StoredAudioReference::with_bytes("archive/clip.wav", bytes))
        .unwrap();

    assert_eq!(item.path, "archive/clip.wav");
    assert_eq!(item.sampling_rate, 8000);
    let decoded = item.array.as_channels().unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[0].len(), 300);
    assert!(decoded[0].iter().all(|s| (s - 0.25).abs() < 1e-3));
    assert!(decoded[1].iter().all(|s| (s + 0.5).abs() < 1e-3));
}

#[rstest]
fn archived_mono_downmix_is_average(temp_dir: TempDir) {
    let channels = vec![vec![0.6f32; 100], vec![0.2f32; 100]];
    let bytes = fs::read(wav_file(&temp_dir, "c.wav", &channels, 16000)).unwrap();

    let audio = Audio::new(AudioFeatureConfig::default().with_archived(true));
    let item = audio
        .decode_example(&StoredAudioReference::with_bytes("c.wav", bytes))
        .unwrap();

    let mono = item.array.as_mono().unwrap();
    assert_eq!(mono.len(), 100);
    assert!(mono.iter().all(|s| (s - 0.4).abs() < 1e-3));
}

#[rstest]
fn plain_column_rejects_archived_reference(temp_dir: TempDir) {
    let bytes = fs::read(wav_file(&temp_dir, "d.wav", &stereo_sine(10, 8000), 8000)).unwrap();
    let audio = Audio::new(AudioFeatureConfig::default());

    let err = audio
        .decode_example(&StoredAudioReference::with_bytes("d.wav", bytes))
        .unwrap_err();
    assert!(matches!(
        err,
        AudioError::MalformedReference {
            expected: ReferenceKind::PathOnly,
            found: ReferenceKind::PathWithBytes,
        }
    ));
}

#[rstest]
#[case::plain(false)]
#[case::archived(true)]
fn mp3_without_mp3_backend(#[case] archived: bool) {
    let audio = Audio::with_backends(
        AudioFeatureConfig::default().with_archived(archived),
        Backends::symphonia().without(Capability::Mp3Decoder),
    );
    let reference = if archived {
        StoredAudioReference::with_bytes("song.mp3", vec![0u8; 64])
    } else {
        StoredAudioReference::path_only("song.mp3")
    };

    let err = audio.decode_example(&reference).unwrap_err();
    assert!(matches!(
        err,
        AudioError::BackendUnavailable {
            capability: Capability::Mp3Decoder
        }
    ));
}

#[cfg(feature = "mp3")]
#[test]
fn garbage_mp3_is_decode_error() {
    let audio = Audio::new(AudioFeatureConfig::default().with_archived(true));
    let err = audio
        .decode_example(&StoredAudioReference::with_bytes("x.mp3", vec![0u8; 64]))
        .unwrap_err();
    assert!(matches!(err, AudioError::Decode(_)));
}

#[test]
fn missing_file_is_io_error() {
    let audio = Audio::new(AudioFeatureConfig::default());
    let err = audio
        .decode_example(&StoredAudioReference::path_only("/nonexistent/clip.wav"))
        .unwrap_err();
    assert!(matches!(err, AudioError::Decode(DecodeError::Io(_))));
}

#[rstest]
fn shared_feature_decodes_concurrently(temp_dir: TempDir) {
    let path = wav_file(&temp_dir, "e.wav", &stereo_sine(4410, 44100), 44100);
    let reference = StoredAudioReference::path_only(path.to_str().unwrap());
    let audio = Arc::new(Audio::new(
        AudioFeatureConfig::default().with_sampling_rate(rate(16000)),
    ));

    let expected = audio.decode_example(&reference).unwrap();
    let results: Vec<DecodedAudio> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| audio.decode_example(&reference).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.iter().all(|item| *item == expected));
    assert_eq!(audio.cached_resamplers(), 1);
}
