//! Atomic file writes: write to a sibling temp file, fsync, then rename.
//!
//! This is the mechanism behind the clone-mutate-replace discipline used
//! by the library document and the config files: it narrows, but does not
//! close, the window in which a concurrent writer could be lost.

use crate::error::FileError;
use camino::Utf8Path;
use std::fs;
use std::io::Write;

use tempfile::NamedTempFile;

/// Atomically write `content` to `path`.
///
/// Creates parent directories if missing, writes into a temp file in the
/// same directory (so the final rename stays on one filesystem), fsyncs,
/// then renames over the target.
pub fn write_file_atomic(path: &Utf8Path, content: &str) -> Result<(), FileError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| FileError::io(parent.as_str(), e))?;
    }

    let temp_dir = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    let mut temp_file =
        NamedTempFile::new_in(temp_dir).map_err(|e| FileError::io(temp_dir.as_str(), e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| FileError::io(path.as_str(), e))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| FileError::io(path.as_str(), e))?;

    temp_file
        .persist(path.as_std_path())
        .map_err(|e| FileError::io(path.as_str(), e.error))?;

    Ok(())
}
