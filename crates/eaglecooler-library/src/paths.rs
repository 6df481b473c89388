//! Path derivation from a library root (spec.md §4.C core layer).

use camino::{Utf8Path, Utf8PathBuf};

/// All on-disk paths are derived from a single library-root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPaths {
    root: Utf8PathBuf,
}

impl LibraryPaths {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn metadata_json(&self) -> Utf8PathBuf {
        self.root.join("metadata.json")
    }

    pub fn tags_json(&self) -> Utf8PathBuf {
        self.root.join("tags.json")
    }

    pub fn mtime_json(&self) -> Utf8PathBuf {
        self.root.join("mtime.json")
    }

    pub fn images_dir(&self) -> Utf8PathBuf {
        self.root.join("images")
    }

    /// `images/{id}.info/`
    pub fn item_dir(&self, id: &str) -> Utf8PathBuf {
        self.images_dir().join(format!("{id}.info"))
    }

    /// `images/{id}.info/metadata.json`
    pub fn item_metadata_json(&self, id: &str) -> Utf8PathBuf {
        self.item_dir(id).join("metadata.json")
    }

    /// Default companion path, `images/{id}.info/{id}.url`. Callers that
    /// must reuse an existing `.url` filename locate it themselves via
    /// [`find_existing_url_companion`](crate::items::find_existing_url_companion).
    pub fn item_url_companion(&self, id: &str) -> Utf8PathBuf {
        self.item_dir(id).join(format!("{id}.url"))
    }
}
