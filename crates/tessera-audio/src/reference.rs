//! Stored audio references, one per row of an audio column.

use std::{fmt, path::Path};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// What a column stores for one audio item.
///
/// Serialized untagged: a bare string for [`StoredAudioReference::PathOnly`],
/// `{"path": ..., "bytes": [...]}` for [`StoredAudioReference::PathWithBytes`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredAudioReference {
    /// Filesystem path, used when the column is not archived.
    PathOnly(String),
    /// Path plus the complete encoded file, used when the column is archived.
    PathWithBytes { path: String, bytes: Bytes },
}

impl StoredAudioReference {
    pub fn path_only<S: Into<String>>(path: S) -> Self {
        Self::PathOnly(path.into())
    }

    pub fn with_bytes<S: Into<String>, B: Into<Bytes>>(path: S, bytes: B) -> Self {
        Self::PathWithBytes {
            path: path.into(),
            bytes: bytes.into(),
        }
    }

    /// Original path, verbatim.
    pub fn path(&self) -> &str {
        match self {
            Self::PathOnly(path) | Self::PathWithBytes { path, .. } => path,
        }
    }

    /// Encoded payload of an archived reference.
    pub fn bytes(&self) -> Option<&Bytes> {
        match self {
            Self::PathOnly(_) => None,
            Self::PathWithBytes { bytes, .. } => Some(bytes),
        }
    }

    /// File extension of the path, used as a format hint for archived payloads.
    pub fn extension(&self) -> Option<&str> {
        Path::new(self.path()).extension().and_then(|e| e.to_str())
    }

    pub fn kind(&self) -> ReferenceKind {
        match self {
            Self::PathOnly(_) => ReferenceKind::PathOnly,
            Self::PathWithBytes { .. } => ReferenceKind::PathWithBytes,
        }
    }
}

impl From<String> for StoredAudioReference {
    fn from(path: String) -> Self {
        Self::PathOnly(path)
    }
}

impl From<&str> for StoredAudioReference {
    fn from(path: &str) -> Self {
        Self::PathOnly(path.to_owned())
    }
}

/// Shape of a [`StoredAudioReference`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    PathOnly,
    PathWithBytes,
}

impl ReferenceKind {
    /// Shape every reference of a column with the given `archived` flag has.
    pub fn for_archived(archived: bool) -> Self {
        if archived {
            Self::PathWithBytes
        } else {
            Self::PathOnly
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathOnly => f.write_str("path-only"),
            Self::PathWithBytes => f.write_str("path+bytes"),
        }
    }
}
