//! In-memory WAV generation (16-bit PCM).

const HEADER_LEN: usize = 44;

fn write_header(wav: &mut Vec<u8>, frames: usize, sample_rate: u32, channels: u16) {
    let bytes_per_sample = 2; // 16-bit
    let data_size = (frames * channels as usize * bytes_per_sample) as u32;
    let file_size = 36 + data_size;

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    let byte_rate = sample_rate * channels as u32 * bytes_per_sample as u32;
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    let block_align = channels * bytes_per_sample as u16;
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
}

/// Create a WAV file with sine wave samples.
///
/// Parameters:
/// - `sample_count`: number of audio frames
/// - `sample_rate`: e.g. 44100
/// - `channels`: e.g. 2 for stereo
///
/// Every channel carries the same signal.
pub fn create_test_wav(sample_count: usize, sample_rate: u32, channels: u16) -> Vec<u8> {
    let mut wav =
        Vec::with_capacity(HEADER_LEN + sample_count * channels as usize * 2);
    write_header(&mut wav, sample_count, sample_rate, channels);

    for i in 0..sample_count {
        let sample = ((i as f32 * 0.1).sin() * 32767.0) as i16;
        for _ in 0..channels {
            wav.extend_from_slice(&sample.to_le_bytes());
        }
    }

    wav
}

/// Create a WAV file from channel-major float samples in `[-1.0, 1.0]`.
///
/// All channels must have the same length.
pub fn create_wav_from_planar(channels: &[Vec<f32>], sample_rate: u32) -> Vec<u8> {
    let frames = channels.first().map_or(0, Vec::len);
    assert!(
        channels.iter().all(|c| c.len() == frames),
        "channels must have equal length"
    );

    let mut wav = Vec::with_capacity(HEADER_LEN + frames * channels.len() * 2);
    write_header(&mut wav, frames, sample_rate, channels.len() as u16);

    for i in 0..frames {
        for channel in channels {
            let sample = (channel[i].clamp(-1.0, 1.0) * 32767.0) as i16;
            wav.extend_from_slice(&sample.to_le_bytes());
        }
    }

    wav
}

/// Sine wave of `frames` samples at `freq` Hz with the given peak amplitude.
pub fn sine(frames: usize, sample_rate: u32, freq: f32, amplitude: f32) -> Vec<f32> {
    (0..frames)
        .map(|i| {
            (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin() * amplitude
        })
        .collect()
}
