//! The selection-poller id-sequence comparator (spec.md §4.E).

/// Two id sequences are equal iff they have the same length and agree
/// pairwise over the first `min(N, length)` positions, where `N = length`
/// when `max_equal_lookups` is negative ("compare entire sequence").
/// Returns `true` when the sequences have changed.
pub fn sequences_changed(previous: &[String], current: &[String], max_equal_lookups: i64) -> bool {
    if previous.len() != current.len() {
        return true;
    }
    let n = if max_equal_lookups < 0 {
        previous.len()
    } else {
        (max_equal_lookups as usize).min(previous.len())
    };
    previous.iter().take(n).zip(current.iter().take(n)).any(|(a, b)| a != b)
}
