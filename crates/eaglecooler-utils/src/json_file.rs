//! Read/write a whole file as pretty-printed JSON.
//!
//! All on-disk files in this workspace (library document, item metadata,
//! derived indexes, config sections) are `JSON.stringify(x, null, 2)`
//! shaped per spec — i.e. UTF-8, 2-space indent. This module is the single
//! place that formatting decision lives.

use crate::atomic_write::write_file_atomic;
use crate::error::FileError;
use camino::Utf8Path;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;

/// Read and parse a JSON file. Propagates both missing-file and
/// malformed-JSON errors — callers that want "missing means empty" call
/// [`read_json_or_default`] instead.
pub fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, FileError> {
    let raw = fs::read_to_string(path).map_err(|e| FileError::io(path.as_str(), e))?;
    serde_json::from_str(&raw).map_err(|e| FileError::json(path.as_str(), e))
}

/// Read and parse a JSON file, treating a missing file as `T::default()`.
/// A malformed (present but unparsable) file still falls back to default,
/// matching the config-store contract in spec.md §7 ("parse failure: for
/// config, treat as empty").
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Utf8Path) -> T {
    match read_json(path) {
        Ok(value) => value,
        Err(_) => T::default(),
    }
}

/// Serialize `value` with 2-space indent and write it atomically.
pub fn write_json_pretty<T: Serialize>(path: &Utf8Path, value: &T) -> Result<(), FileError> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|e| FileError::json(path.as_str(), e))?;
    write_file_atomic(path, &rendered)
}
