//! The in-process host API surface the core consumes (spec.md §6).
//!
//! Only the operations the core actually calls are named here; the
//! host's full object surface is out of scope per spec.md §1. No
//! production implementation ships in this crate — a live implementation
//! is provided by whatever embeds the core against the real host.

use eaglecooler_extract::{FolderRecord, ItemRecord, LibraryContext};
use serde::{Deserialize, Serialize};

/// The manifest the host hands a plugin on its "on create" lifecycle hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl PluginManifest {
    /// `manifest.id` falling back to `manifest.name` falling back to the
    /// literal `"unknown-plugin"` (spec.md §4.D).
    pub fn plugin_id(&self) -> String {
        self.id
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| "unknown-plugin".to_string())
    }
}

/// Minimum in-process surface required by the core.
pub trait HostApi {
    type Item: ItemRecord;
    type Folder: FolderRecord;
    type Library: LibraryContext;

    /// `{path, name}` of the currently open library, if any.
    fn library(&self) -> Self::Library;

    /// The host-reported home directory, queried rather than read from
    /// the process environment (spec.md §6).
    fn home_dir(&self) -> camino::Utf8PathBuf;

    fn selected_items(&self) -> Vec<Self::Item>;
    fn selected_folders(&self) -> Vec<Self::Folder>;
    fn all_items(&self) -> Vec<Self::Item>;
    fn all_folders(&self) -> Vec<Self::Folder>;
    fn item_by_id(&self, id: &str) -> Option<Self::Item>;
    fn folder_by_id(&self, id: &str) -> Option<Self::Folder>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_id_prefers_id_over_name() {
        let manifest = PluginManifest {
            id: Some("com.example.plugin".into()),
            name: Some("Example".into()),
        };
        assert_eq!(manifest.plugin_id(), "com.example.plugin");
    }

    #[test]
    fn plugin_id_falls_back_to_name() {
        let manifest = PluginManifest {
            id: None,
            name: Some("Example".into()),
        };
        assert_eq!(manifest.plugin_id(), "Example");
    }

    #[test]
    fn plugin_id_falls_back_to_unknown() {
        let manifest = PluginManifest::default();
        assert_eq!(manifest.plugin_id(), "unknown-plugin");
    }
}
