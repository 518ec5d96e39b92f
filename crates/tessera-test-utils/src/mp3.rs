//! MP3 fixtures.

/// 40 frames of MPEG-1 Layer III silence: 44100 Hz, stereo, 128 kbps.
///
/// Every frame has zeroed side information and main data, which decodes to
/// 1152 silent samples per channel.
pub const SILENCE_MP3: &[u8] = include_bytes!("../fixtures/silence_44100_stereo.mp3");

/// Native rate of [`SILENCE_MP3`].
pub const SILENCE_MP3_RATE: u32 = 44100;

/// Samples per channel in one MPEG-1 Layer III frame.
pub const MP3_FRAME_SAMPLES: usize = 1152;

/// Frames in [`SILENCE_MP3`].
pub const SILENCE_MP3_FRAMES: usize = 40;

const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
const FRAME_LEN: usize = 417;

/// `frames` MPEG-1 Layer III frames with valid headers and garbage payloads.
///
/// The format is detected but no frame decodes.
pub fn corrupt_mp3(frames: usize) -> Vec<u8> {
    let mut frame = vec![0xFF; FRAME_LEN];
    frame[..FRAME_HEADER.len()].copy_from_slice(&FRAME_HEADER);
    frame.repeat(frames)
}
