//! Backend selection for a single stored reference.

use std::fmt;

/// Decoder family that handles a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// General-purpose decoder reading from the filesystem.
    Path,
    /// General-purpose decoder reading the archived bytes.
    Buffer,
    /// MP3 decoder, for either storage mode.
    Mp3,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => f.write_str("path"),
            Self::Buffer => f.write_str("buffer"),
            Self::Mp3 => f.write_str("mp3"),
        }
    }
}

const MP3_SUFFIX: &str = ".mp3";

/// Choose the backend for `path` in a column with the given `archived` flag.
///
/// The `.mp3` suffix match is case-sensitive: `track.MP3` goes to the
/// general-purpose backend of the storage mode.
pub fn select_backend(path: &str, archived: bool) -> BackendKind {
    if path.ends_with(MP3_SUFFIX) {
        BackendKind::Mp3
    } else if archived {
        BackendKind::Buffer
    } else {
        BackendKind::Path
    }
}
