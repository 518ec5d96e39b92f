//! Integration tests for tessera-audio

mod batch_tests;
mod decode_tests;
#[cfg(feature = "mp3")]
mod mp3_tests;
