//! Generic poller engine shared by all five pollers (spec.md §4.E).
//!
//! A poller tracks one `previous` baseline and an arbitrary number of
//! subscribers, each with its own interval and (for selection pollers)
//! its own change comparator — the event payload always carries the
//! full previous/current snapshot regardless of which subscriber's
//! comparator fired.

use crate::events::ChangeEvent;

pub type ChangedFn<T> = Box<dyn Fn(&T, &T) -> bool>;
type CallbackFn<T> = Box<dyn FnMut(&ChangeEvent<T>)>;

struct Subscriber<T> {
    id: u64,
    interval_ms: u64,
    changed: Option<ChangedFn<T>>,
    callback: CallbackFn<T>,
}

pub struct Poller<T> {
    previous: Option<T>,
    subscribers: Vec<Subscriber<T>>,
    next_id: u64,
}

impl<T: Clone> Poller<T> {
    pub fn new() -> Self {
        Self {
            previous: None,
            subscribers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn min_interval_ms(&self) -> Option<u64> {
        self.subscribers.iter().map(|s| s.interval_ms).min()
    }

    /// Register a subscriber. `changed` overrides the poller's default
    /// comparator for this subscriber only (selection pollers use this
    /// for per-subscription `maxEqualLookups`); `None` uses the default
    /// passed to [`Poller::tick`].
    ///
    /// If this is the first subscriber, `previous` is reset to `None` so
    /// the next tick baselines without firing, per spec.md §4.E.
    pub fn subscribe(
        &mut self,
        interval_ms: u64,
        changed: Option<ChangedFn<T>>,
        callback: CallbackFn<T>,
    ) -> u64 {
        let is_first = self.subscribers.is_empty();
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            interval_ms,
            changed,
            callback,
        });
        if is_first {
            self.previous = None;
        }
        id
    }

    /// Remove a subscriber. Returns `true` if the poller now has zero
    /// subscribers (caller should stop its timer and has already had
    /// `previous` cleared).
    pub fn unsubscribe(&mut self, id: u64) -> bool {
        self.subscribers.retain(|s| s.id != id);
        let empty = self.subscribers.is_empty();
        if empty {
            self.previous = None;
        }
        empty
    }

    /// Clear the cached previous value without touching subscribers
    /// (cascade-reset, spec.md §4.E).
    pub fn cascade_reset(&mut self) {
        self.previous = None;
    }

    /// Read the current baseline without consuming it.
    pub fn peek_previous(&self) -> Option<&T> {
        self.previous.as_ref()
    }

    /// One observation. If there is no baseline yet, `current` becomes
    /// the baseline without firing anyone. Otherwise each subscriber's
    /// own comparator (or `default_changed` if it has none) decides
    /// whether it fires; a panicking callback is isolated and logged,
    /// other subscribers still run.
    pub fn tick(&mut self, current: T, default_changed: impl Fn(&T, &T) -> bool, timestamp: i64) {
        let Some(previous) = self.previous.clone() else {
            self.previous = Some(current);
            return;
        };

        for subscriber in &mut self.subscribers {
            let changed = match &subscriber.changed {
                Some(f) => f(&previous, &current),
                None => default_changed(&previous, &current),
            };
            if changed {
                let event = ChangeEvent::new(previous.clone(), current.clone(), timestamp);
                let callback = &mut subscriber.callback;
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| callback(&event)));
                if result.is_err() {
                    tracing::error!(subscriber_id = subscriber.id, "poller subscriber callback panicked");
                }
            }
        }

        self.previous = Some(current);
    }
}

impl<T: Clone> Default for Poller<T> {
    fn default() -> Self {
        Self::new()
    }
}
