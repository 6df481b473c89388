//! The `{previous, current, timestamp}` event payload (spec.md §4.E).

/// A single change notification. `previous`/`current` carry the full
/// snapshot sequences regardless of how the change was detected.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent<T> {
    pub previous: T,
    pub current: T,
    pub timestamp: i64,
}

impl<T> ChangeEvent<T> {
    pub fn new(previous: T, current: T, timestamp: i64) -> Self {
        Self {
            previous,
            current,
            timestamp,
        }
    }
}
