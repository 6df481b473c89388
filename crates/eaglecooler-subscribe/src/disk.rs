//! The two on-disk mtime pollers (spec.md §4.E, pollers 4 and 5).

use camino::Utf8Path;

/// `{mtime}` payload for the on-disk pollers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MtimeSnapshot {
    pub mtime: i64,
}

/// `stat(path).mtimeMs`. Returns `None` on any stat failure — the
/// caller treats this as "host API failure in a poller tick: log, skip
/// this tick" (spec.md §7).
pub fn stat_mtime_ms(path: &Utf8Path) -> Option<i64> {
    let metadata = std::fs::metadata(path.as_std_path()).ok()?;
    let modified = metadata.modified().ok()?;
    let duration = modified.duration_since(std::time::UNIX_EPOCH).ok()?;
    Some(duration.as_millis() as i64)
}
