//! All integration tests for tessera
#![expect(
    clippy::unwrap_used,
    reason = "integration test crate: unwraps are acceptable in test code"
)]

mod common;
mod tessera_audio;
mod tessera_decode;
