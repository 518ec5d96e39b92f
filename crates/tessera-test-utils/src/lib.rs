#![forbid(unsafe_code)]

//! Shared test utilities for the tessera workspace.

pub mod fixtures;
pub mod mp3;
pub mod wav;

pub use fixtures::*;
pub use mp3::{
    MP3_FRAME_SAMPLES, SILENCE_MP3, SILENCE_MP3_FRAMES, SILENCE_MP3_RATE, corrupt_mp3,
};
pub use wav::{create_test_wav, create_wav_from_planar, sine};
