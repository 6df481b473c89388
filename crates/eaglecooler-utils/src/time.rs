//! Epoch-millisecond timestamps, the unit every on-disk record in this
//! workspace uses for `importedAt`/`modifiedAt`/`mtime`/index entries.

use chrono::Utc;

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
