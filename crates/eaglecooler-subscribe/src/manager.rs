//! The process-wide coordinator owning all five pollers (spec.md §4.E).
//!
//! Scheduling is single-threaded and cooperative: every driving loop is
//! spawned with [`tokio::task::spawn_local`] and must run inside a
//! `tokio::task::LocalSet`. A loop checks its poller's subscriber count
//! on each wake and terminates itself rather than being aborted via a
//! stored `JoinHandle` — accepting a delay of up to one interval before
//! an emptied poller's task actually exits.

use std::cell::Cell;
use std::panic::UnwindSafe;
use std::rc::Rc;
use std::time::Duration;

use eaglecooler_extract::{extract_item, FolderRecord, ItemRecord, LibraryContext};
use eaglecooler_host::HostApi;
use eaglecooler_library::LibraryPaths;
use eaglecooler_utils::time::now_millis;

use crate::comparator::sequences_changed;
use crate::disk::{stat_mtime_ms, MtimeSnapshot};
use crate::events::ChangeEvent;
use crate::handle::SubscriptionHandle;
use crate::poller::Poller;

const LIBRARY_IDENTITY_INTERVAL_MS: u64 = 1000;
const DEFAULT_SUBSCRIBE_INTERVAL_MS: u64 = 500;
const DEFAULT_MAX_EQUAL_LOOKUPS: i64 = -1;

/// Per-subscription tuning (spec.md §4.E "Per-subscription options").
#[derive(Debug, Clone, Copy)]
pub struct SubscribeOptions {
    pub interval_ms: u64,
    pub max_equal_lookups: i64,
}

impl Default for SubscribeOptions {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_SUBSCRIBE_INTERVAL_MS,
            max_equal_lookups: DEFAULT_MAX_EQUAL_LOOKUPS,
        }
    }
}

fn library_identity_changed(previous: &eaglecooler_extract::LibraryState, current: &eaglecooler_extract::LibraryState) -> bool {
    previous.path != current.path
}

fn mtime_changed(previous: &MtimeSnapshot, current: &MtimeSnapshot) -> bool {
    previous.mtime != current.mtime
}

/// Call a host accessor and treat a panic as "host API failure in a
/// poller tick" (spec.md §7): log and yield nothing so the caller skips
/// this tick, keeping `previous` unchanged.
fn guarded_call<T>(what: &'static str, f: impl FnOnce() -> T + UnwindSafe) -> Option<T> {
    match std::panic::catch_unwind(f) {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(what, "poller host call failed; skipping this tick");
            None
        }
    }
}

struct Inner<H: HostApi + 'static> {
    host: H,
    library_identity: std::cell::RefCell<Poller<eaglecooler_extract::LibraryState>>,
    item_selection: std::cell::RefCell<Poller<Vec<String>>>,
    folder_selection: std::cell::RefCell<Poller<Vec<String>>>,
    library_config: std::cell::RefCell<Poller<MtimeSnapshot>>,
    library_structure: std::cell::RefCell<Poller<MtimeSnapshot>>,
    identity_running: Cell<bool>,
    item_running: Cell<bool>,
    folder_running: Cell<bool>,
    config_running: Cell<bool>,
    structure_running: Cell<bool>,
}

impl<H: HostApi + 'static> Inner<H> {
    fn any_child_active(&self) -> bool {
        self.item_selection.borrow().subscriber_count() > 0
            || self.folder_selection.borrow().subscriber_count() > 0
            || self.library_config.borrow().subscriber_count() > 0
            || self.library_structure.borrow().subscriber_count() > 0
    }
}

/// The single process-wide subscription coordinator (spec.md §4.E).
///
/// Cheaply cloneable: internally `Rc`-backed, intended for single-threaded
/// cooperative use, never `Send`.
pub struct SubscriptionManager<H: HostApi + 'static> {
    inner: Rc<Inner<H>>,
}

impl<H: HostApi + 'static> Clone for SubscriptionManager<H> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<H: HostApi + 'static> SubscriptionManager<H> {
    pub fn new(host: H) -> Self {
        Self {
            inner: Rc::new(Inner {
                host,
                library_identity: std::cell::RefCell::new(Poller::new()),
                item_selection: std::cell::RefCell::new(Poller::new()),
                folder_selection: std::cell::RefCell::new(Poller::new()),
                library_config: std::cell::RefCell::new(Poller::new()),
                library_structure: std::cell::RefCell::new(Poller::new()),
                identity_running: Cell::new(false),
                item_running: Cell::new(false),
                folder_running: Cell::new(false),
                config_running: Cell::new(false),
                structure_running: Cell::new(false),
            }),
        }
    }

    /// Subscribe to library-identity change (fixed 1000 ms interval).
    pub fn subscribe_library_change(
        &self,
        callback: impl FnMut(&ChangeEvent<eaglecooler_extract::LibraryState>) + 'static,
    ) -> SubscriptionHandle {
        self.ensure_identity_running();
        let id = self
            .inner
            .library_identity
            .borrow_mut()
            .subscribe(LIBRARY_IDENTITY_INTERVAL_MS, None, Box::new(callback));
        let inner = self.inner.clone();
        SubscriptionHandle::new(move || {
            inner.library_identity.borrow_mut().unsubscribe(id);
        })
    }

    /// Subscribe to the selected-items id sequence.
    pub fn subscribe_item_selection(
        &self,
        options: SubscribeOptions,
        callback: impl FnMut(&ChangeEvent<Vec<String>>) + 'static,
    ) -> SubscriptionHandle {
        self.ensure_identity_running();
        self.ensure_item_running();
        let n = options.max_equal_lookups;
        let changed: crate::poller::ChangedFn<Vec<String>> =
            Box::new(move |previous, current| sequences_changed(previous, current, n));
        let id = self.inner.item_selection.borrow_mut().subscribe(
            options.interval_ms,
            Some(changed),
            Box::new(callback),
        );
        let inner = self.inner.clone();
        SubscriptionHandle::new(move || {
            inner.item_selection.borrow_mut().unsubscribe(id);
        })
    }

    /// Subscribe to the selected-folders id sequence.
    pub fn subscribe_folder_selection(
        &self,
        options: SubscribeOptions,
        callback: impl FnMut(&ChangeEvent<Vec<String>>) + 'static,
    ) -> SubscriptionHandle {
        self.ensure_identity_running();
        self.ensure_folder_running();
        let n = options.max_equal_lookups;
        let changed: crate::poller::ChangedFn<Vec<String>> =
            Box::new(move |previous, current| sequences_changed(previous, current, n));
        let id = self.inner.folder_selection.borrow_mut().subscribe(
            options.interval_ms,
            Some(changed),
            Box::new(callback),
        );
        let inner = self.inner.clone();
        SubscriptionHandle::new(move || {
            inner.folder_selection.borrow_mut().unsubscribe(id);
        })
    }

    /// Subscribe to `library-root/metadata.json` mtime changes.
    pub fn subscribe_library_config(
        &self,
        options: SubscribeOptions,
        callback: impl FnMut(&ChangeEvent<MtimeSnapshot>) + 'static,
    ) -> SubscriptionHandle {
        self.ensure_identity_running();
        self.ensure_config_running();
        let id = self
            .inner
            .library_config
            .borrow_mut()
            .subscribe(options.interval_ms, None, Box::new(callback));
        let inner = self.inner.clone();
        SubscriptionHandle::new(move || {
            inner.library_config.borrow_mut().unsubscribe(id);
        })
    }

    /// Subscribe to `library-root` mtime changes.
    pub fn subscribe_library_structure(
        &self,
        options: SubscribeOptions,
        callback: impl FnMut(&ChangeEvent<MtimeSnapshot>) + 'static,
    ) -> SubscriptionHandle {
        self.ensure_identity_running();
        self.ensure_structure_running();
        let id = self
            .inner
            .library_structure
            .borrow_mut()
            .subscribe(options.interval_ms, None, Box::new(callback));
        let inner = self.inner.clone();
        SubscriptionHandle::new(move || {
            inner.library_structure.borrow_mut().unsubscribe(id);
        })
    }

    fn ensure_identity_running(&self) {
        if self.inner.identity_running.replace(true) {
            return;
        }
        let inner = self.inner.clone();
        tokio::task::spawn_local(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(LIBRARY_IDENTITY_INTERVAL_MS)).await;
                if inner.library_identity.borrow().subscriber_count() == 0 && !inner.any_child_active() {
                    inner.identity_running.set(false);
                    break;
                }
                let previous_path = inner
                    .library_identity
                    .borrow()
                    .peek_previous()
                    .map(|s| s.path.clone());
                let library = inner.host.library();
                let current = eaglecooler_extract::LibraryState {
                    path: library.path().unwrap_or_default(),
                    name: library.name().unwrap_or_default(),
                };
                inner
                    .library_identity
                    .borrow_mut()
                    .tick(current.clone(), library_identity_changed, now_millis());
                if let Some(previous_path) = previous_path {
                    if previous_path != current.path {
                        inner.item_selection.borrow_mut().cascade_reset();
                        inner.folder_selection.borrow_mut().cascade_reset();
                        inner.library_config.borrow_mut().cascade_reset();
                        inner.library_structure.borrow_mut().cascade_reset();
                    }
                }
            }
        });
    }

    fn ensure_item_running(&self) {
        if self.inner.item_running.replace(true) {
            return;
        }
        let inner = self.inner.clone();
        tokio::task::spawn_local(async move {
            loop {
                let interval = inner
                    .item_selection
                    .borrow()
                    .min_interval_ms()
                    .unwrap_or(DEFAULT_SUBSCRIBE_INTERVAL_MS);
                tokio::time::sleep(Duration::from_millis(interval)).await;
                if inner.item_selection.borrow().subscriber_count() == 0 {
                    inner.item_running.set(false);
                    break;
                }
                let ids = guarded_call("selected_items", std::panic::AssertUnwindSafe(|| {
                    inner
                        .host
                        .selected_items()
                        .iter()
                        .map(|item| extract_item(item).id)
                        .collect::<Vec<String>>()
                }));
                if let Some(ids) = ids {
                    inner.item_selection.borrow_mut().tick(
                        ids,
                        |a, b| sequences_changed(a, b, DEFAULT_MAX_EQUAL_LOOKUPS),
                        now_millis(),
                    );
                }
            }
        });
    }

    fn ensure_folder_running(&self) {
        if self.inner.folder_running.replace(true) {
            return;
        }
        let inner = self.inner.clone();
        tokio::task::spawn_local(async move {
            loop {
                let interval = inner
                    .folder_selection
                    .borrow()
                    .min_interval_ms()
                    .unwrap_or(DEFAULT_SUBSCRIBE_INTERVAL_MS);
                tokio::time::sleep(Duration::from_millis(interval)).await;
                if inner.folder_selection.borrow().subscriber_count() == 0 {
                    inner.folder_running.set(false);
                    break;
                }
                let ids = guarded_call("selected_folders", std::panic::AssertUnwindSafe(|| {
                    inner
                        .host
                        .selected_folders()
                        .iter()
                        .map(FolderRecord::id)
                        .collect::<Vec<String>>()
                }));
                if let Some(ids) = ids {
                    inner.folder_selection.borrow_mut().tick(
                        ids,
                        |a, b| sequences_changed(a, b, DEFAULT_MAX_EQUAL_LOOKUPS),
                        now_millis(),
                    );
                }
            }
        });
    }

    fn ensure_config_running(&self) {
        if self.inner.config_running.replace(true) {
            return;
        }
        let inner = self.inner.clone();
        tokio::task::spawn_local(async move {
            loop {
                let interval = inner
                    .library_config
                    .borrow()
                    .min_interval_ms()
                    .unwrap_or(DEFAULT_SUBSCRIBE_INTERVAL_MS);
                tokio::time::sleep(Duration::from_millis(interval)).await;
                if inner.library_config.borrow().subscriber_count() == 0 {
                    inner.config_running.set(false);
                    break;
                }
                let Some(root) = inner.host.library().path() else {
                    continue;
                };
                let paths = LibraryPaths::new(camino::Utf8PathBuf::from(root));
                if let Some(mtime) = stat_mtime_ms(&paths.metadata_json()) {
                    inner
                        .library_config
                        .borrow_mut()
                        .tick(MtimeSnapshot { mtime }, mtime_changed, now_millis());
                }
            }
        });
    }

    fn ensure_structure_running(&self) {
        if self.inner.structure_running.replace(true) {
            return;
        }
        let inner = self.inner.clone();
        tokio::task::spawn_local(async move {
            loop {
                let interval = inner
                    .library_structure
                    .borrow()
                    .min_interval_ms()
                    .unwrap_or(DEFAULT_SUBSCRIBE_INTERVAL_MS);
                tokio::time::sleep(Duration::from_millis(interval)).await;
                if inner.library_structure.borrow().subscriber_count() == 0 {
                    inner.structure_running.set(false);
                    break;
                }
                let Some(root) = inner.host.library().path() else {
                    continue;
                };
                let paths = LibraryPaths::new(camino::Utf8PathBuf::from(root));
                if let Some(mtime) = stat_mtime_ms(paths.root()) {
                    inner
                        .library_structure
                        .borrow_mut()
                        .tick(MtimeSnapshot { mtime }, mtime_changed, now_millis());
                }
            }
        });
    }
}
