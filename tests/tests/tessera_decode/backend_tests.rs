//! Default backends used directly, without the audio feature.

use rstest::rstest;
use tempfile::TempDir;
use tessera::decode::{
    AverageMixer, BufferDecoder, MonoMixer, PathDecoder, ResampleKernel, ResamplerFactory,
    ResamplerParams, ResamplerQuality, SincResampler, SymphoniaBufferDecoder,
    SymphoniaPathDecoder,
};

use crate::common::{create_wav_from_planar, peak, stereo_sine, temp_dir, wav_file};

#[rstest]
fn path_and_buffer_decoders_agree(temp_dir: TempDir) {
    let channels = stereo_sine(1234, 16000);
    let path = wav_file(&temp_dir, "a.wav", &channels, 16000);

    let planar = SymphoniaPathDecoder::default().load(&path, None).unwrap();
    let interleaved = SymphoniaBufferDecoder::default()
        .read(create_wav_from_planar(&channels, 16000).into(), Some("wav"))
        .unwrap();

    assert_eq!(interleaved.spec, planar.spec().unwrap());
    assert_eq!(interleaved.into_planar().unwrap(), planar);
}

#[rstest]
#[case(ResamplerQuality::Normal)]
#[case(ResamplerQuality::Good)]
#[case(ResamplerQuality::High)]
fn decode_resample_downmix(#[case] quality: ResamplerQuality, temp_dir: TempDir) {
    let path = wav_file(&temp_dir, "b.wav", &stereo_sine(48000, 48000), 48000);
    let planar = SymphoniaPathDecoder::default().load(&path, None).unwrap();

    let factory = SincResampler::new(ResamplerParams::default().with_quality(quality));
    let mut kernel = factory.build(planar.sample_rate, 16000, planar.channel_count()).unwrap();
    let resampled = kernel.process(&planar.channels).unwrap();
    let mono = AverageMixer.to_mono(&resampled).unwrap();

    assert_eq!(mono.len(), 16000);
    let level = peak(&mono[1000..15000]);
    assert!((level - 0.4).abs() < 0.03, "{quality:?}: peak {level}");
}
