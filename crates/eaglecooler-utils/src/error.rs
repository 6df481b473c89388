//! Shared file-level error type.
//!
//! Every crate in this workspace that touches disk composes its own
//! `thiserror` enum around [`FileError`] via `#[from]`, mirroring how the
//! teacher crate's top-level error composes its sub-errors.

use std::io;
use thiserror::Error;

/// Error reading or writing a JSON-backed file on disk.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed json at {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FileError {
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// True for "file does not exist" — the one IO failure several callers
    /// (config files, optional index files) treat as an empty document
    /// rather than propagating.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
