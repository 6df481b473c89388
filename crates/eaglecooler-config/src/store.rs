//! The config-store operations (spec.md §4.D): `get`, `getOrDefault`,
//! `set`, `setMany`, `remove`, `has`, `clear`, `keys`, `getAll`.

use crate::error::ConfigError;
use crate::scope::{config_file_name, section_key, LibraryIdentity, ScopeDescriptor};
use camino::{Utf8Path, Utf8PathBuf};
use eaglecooler_utils::json_file::{read_json_or_default, write_json_pretty};
use eaglecooler_utils::paths::config_dir;
use serde_json::{Map, Value};

/// A single config-store instance bound to one scope. Stateless beyond
/// the file path and section key it was opened with — every operation
/// re-reads the file, matching spec.md §4.D's "writers must explicitly
/// re-read before each section update".
#[derive(Debug, Clone)]
pub struct ConfigStore {
    file_path: Utf8PathBuf,
    section_key: Option<String>,
}

impl ConfigStore {
    /// Open a store for `descriptor` under the given home directory.
    /// `library` is required when `descriptor.storage` is `Library`.
    pub fn open(
        home: &Utf8PathBuf,
        descriptor: &ScopeDescriptor,
        library: Option<&LibraryIdentity>,
    ) -> Result<Self, ConfigError> {
        let file_path = config_dir(home).join(config_file_name(descriptor));
        let section_key = section_key(descriptor, library)?;
        Ok(Self {
            file_path,
            section_key,
        })
    }

    fn load_document(&self) -> Map<String, Value> {
        read_json_or_default(&self.file_path)
    }

    fn section<'a>(&self, doc: &'a Map<String, Value>) -> Option<&'a Map<String, Value>> {
        match &self.section_key {
            None => Some(doc),
            Some(key) => doc.get(key).and_then(Value::as_object),
        }
    }

    fn mutate_section(&self, mutate: impl FnOnce(&mut Map<String, Value>)) -> Result<(), ConfigError> {
        let mut doc = self.load_document();
        match &self.section_key {
            None => mutate(&mut doc),
            Some(key) => {
                let mut section = doc.get(key).and_then(Value::as_object).cloned().unwrap_or_default();
                mutate(&mut section);
                doc.insert(key.clone(), Value::Object(section));
            }
        }
        write_json_pretty(&self.file_path, &doc)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let doc = self.load_document();
        self.section(&doc).and_then(|s| s.get(key)).cloned()
    }

    pub fn get_or_default(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    pub fn set(&self, key: &str, value: Value) -> Result<(), ConfigError> {
        self.mutate_section(|section| {
            section.insert(key.to_string(), value);
        })
    }

    pub fn set_many(&self, patch: Map<String, Value>) -> Result<(), ConfigError> {
        self.mutate_section(|section| {
            for (key, value) in patch {
                section.insert(key, value);
            }
        })
    }

    pub fn remove(&self, key: &str) -> Result<bool, ConfigError> {
        let mut existed = false;
        self.mutate_section(|section| {
            existed = section.remove(key).is_some();
        })?;
        Ok(existed)
    }

    pub fn has(&self, key: &str) -> bool {
        let doc = self.load_document();
        self.section(&doc).map(|s| s.contains_key(key)).unwrap_or(false)
    }

    /// Empty this scope's section only — sibling sections in the same
    /// physical file are untouched.
    pub fn clear(&self) -> Result<(), ConfigError> {
        self.mutate_section(|section| section.clear())
    }

    pub fn keys(&self) -> Vec<String> {
        let doc = self.load_document();
        self.section(&doc)
            .map(|s| s.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get_all(&self) -> Map<String, Value> {
        let doc = self.load_document();
        self.section(&doc).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin_context::init_plugin_context;
    use eaglecooler_host::PluginManifest;
    use serde_json::json;
    use tempfile::TempDir;

    fn home_in(dir: &TempDir) -> Utf8PathBuf {
        Utf8Path::from_path(dir.path()).unwrap().to_path_buf()
    }

    fn ensure_plugin_initialized() {
        init_plugin_context(&PluginManifest {
            id: Some("store-test-plugin".into()),
            name: None,
        });
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(&home_in(&dir), &ScopeDescriptor::global(), None).unwrap();
        assert_eq!(store.get("missing"), None);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(&home_in(&dir), &ScopeDescriptor::global(), None).unwrap();
        store.set("theme", json!("dark")).unwrap();
        assert_eq!(store.get("theme"), Some(json!("dark")));
    }

    #[test]
    fn get_or_default_falls_back() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(&home_in(&dir), &ScopeDescriptor::global(), None).unwrap();
        assert_eq!(store.get_or_default("theme", json!("light")), json!("light"));
    }

    #[test]
    fn set_many_applies_patch() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(&home_in(&dir), &ScopeDescriptor::global(), None).unwrap();
        let mut patch = Map::new();
        patch.insert("a".into(), json!(1));
        patch.insert("b".into(), json!(2));
        store.set_many(patch).unwrap();
        assert_eq!(store.get("a"), Some(json!(1)));
        assert_eq!(store.get("b"), Some(json!(2)));
    }

    #[test]
    fn remove_reports_whether_key_existed() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(&home_in(&dir), &ScopeDescriptor::global(), None).unwrap();
        store.set("a", json!(1)).unwrap();
        assert!(store.remove("a").unwrap());
        assert!(!store.remove("a").unwrap());
    }

    #[test]
    fn clear_only_empties_this_scopes_section() {
        ensure_plugin_initialized();
        let dir = TempDir::new().unwrap();
        let home = home_in(&dir);
        let plugin_store = ConfigStore::open(&home, &ScopeDescriptor::plugin(), None).unwrap();
        plugin_store.set("a", json!(1)).unwrap();
        plugin_store.clear().unwrap();
        assert!(plugin_store.keys().is_empty());
    }

    #[test]
    fn sibling_sections_survive_a_set() {
        let dir = TempDir::new().unwrap();
        let home = home_in(&dir);
        let file_path = config_dir(&home).join("library.json");
        std::fs::create_dir_all(file_path.parent().unwrap()).unwrap();
        std::fs::write(&file_path, r#"{"other-section": {"x": 1}}"#).unwrap();

        let library = LibraryIdentity {
            path: "/lib/a".to_string(),
            name: "Lib A".to_string(),
        };
        let store = ConfigStore::open(&home, &ScopeDescriptor::library(), Some(&library)).unwrap();
        store.set("y", json!(2)).unwrap();

        let raw = std::fs::read_to_string(&file_path).unwrap();
        assert!(raw.contains("other-section"));
        assert!(raw.contains('y'));
    }

    #[test]
    fn get_all_and_keys_reflect_current_section() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(&home_in(&dir), &ScopeDescriptor::global(), None).unwrap();
        store.set("a", json!(1)).unwrap();
        store.set("b", json!(2)).unwrap();
        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.get_all().len(), 2);
    }
}
