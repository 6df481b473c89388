//! Home-directory plumbing.
//!
//! spec.md §6 requires the home directory to come exclusively from the
//! host's query, never from the process environment, so that a plugin
//! behaves identically under the host's renderer and an out-of-host test
//! runner. `override_home` lets tests pin it without touching `$HOME`,
//! mirroring the teacher's thread-local home override in its own
//! `paths.rs`.

use camino::Utf8PathBuf;
use std::cell::RefCell;

thread_local! {
    static THREAD_HOME: RefCell<Option<Utf8PathBuf>> = const { RefCell::new(None) };
}

/// Pin the home directory for the current thread for the duration of a test.
pub fn override_home(path: Utf8PathBuf) {
    THREAD_HOME.with(|cell| *cell.borrow_mut() = Some(path));
}

pub fn clear_home_override() {
    THREAD_HOME.with(|cell| *cell.borrow_mut() = None);
}

/// Resolve the effective home directory: the thread-local test override if
/// set, otherwise the value supplied by the caller (normally the host's
/// home-directory query result).
pub fn resolve_home(host_reported: &Utf8PathBuf) -> Utf8PathBuf {
    THREAD_HOME.with(|cell| cell.borrow().clone().unwrap_or_else(|| host_reported.clone()))
}

/// The fixed subdirectory under home where config files live (§6).
pub fn config_dir(home: &Utf8PathBuf) -> Utf8PathBuf {
    home.join(".eaglecooler").join("config")
}
