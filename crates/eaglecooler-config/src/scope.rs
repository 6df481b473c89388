//! Scope descriptors, storage-file selection, and section-key derivation
//! (spec.md §4.D).

use crate::error::ConfigError;
use crate::plugin_context::plugin_id;
use crate::uuid_file::get_or_create_library_uuid;
use camino::Utf8Path;
use sha2::{Digest, Sha256};

/// Which of the four well-known files a scope is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    Global,
    Plugin,
    Library,
}

/// The three orthogonal booleans plus storage tag that together select a
/// physical file and a section key (spec.md §4.D's nine-row table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeDescriptor {
    pub this_plugin_only: bool,
    pub use_library_name: bool,
    pub use_library_uuid: bool,
    pub storage: StorageType,
}

impl ScopeDescriptor {
    pub fn global() -> Self {
        Self {
            this_plugin_only: false,
            use_library_name: false,
            use_library_uuid: false,
            storage: StorageType::Global,
        }
    }

    pub fn global_per_plugin() -> Self {
        Self {
            this_plugin_only: true,
            ..Self::global()
        }
    }

    pub fn plugin() -> Self {
        Self {
            this_plugin_only: false,
            use_library_name: false,
            use_library_uuid: false,
            storage: StorageType::Plugin,
        }
    }

    pub fn library() -> Self {
        Self {
            this_plugin_only: false,
            use_library_name: false,
            use_library_uuid: false,
            storage: StorageType::Library,
        }
    }

    pub fn library_per_plugin() -> Self {
        Self {
            this_plugin_only: true,
            ..Self::library()
        }
    }

    pub fn library_by_name() -> Self {
        Self {
            use_library_name: true,
            ..Self::library()
        }
    }

    pub fn library_by_name_per_plugin() -> Self {
        Self {
            this_plugin_only: true,
            use_library_name: true,
            ..Self::library()
        }
    }

    pub fn library_by_uuid() -> Self {
        Self {
            use_library_uuid: true,
            ..Self::library()
        }
    }

    pub fn library_by_uuid_per_plugin() -> Self {
        Self {
            this_plugin_only: true,
            use_library_uuid: true,
            ..Self::library()
        }
    }
}

/// `{path, name}` of the currently open library, as needed to derive a
/// library-scoped section key. `path` doubles as the library root for
/// locating `cooler-uuid.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryIdentity {
    pub path: String,
    pub name: String,
}

/// The physical file name a scope is backed by.
pub fn config_file_name(descriptor: &ScopeDescriptor) -> &'static str {
    match (descriptor.storage, descriptor.this_plugin_only) {
        (StorageType::Global, false) => "global.json",
        (StorageType::Global, true) => "globalPerPlugin.json",
        (StorageType::Plugin, _) => "plugin.json",
        (StorageType::Library, _) => "library.json",
    }
}

/// First 16 lowercase hex characters of SHA-256(`input`).
pub fn sha_prefix(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let hex: String = digest.iter().map(|byte| format!("{byte:02x}")).collect();
    hex[..16].to_string()
}

/// Derive the section key for `descriptor`, or `None` for the root-level
/// global scope. May lazily create the library UUID file.
pub fn section_key(
    descriptor: &ScopeDescriptor,
    library: Option<&LibraryIdentity>,
) -> Result<Option<String>, ConfigError> {
    match descriptor.storage {
        StorageType::Global => {
            if descriptor.this_plugin_only {
                Ok(Some(sha_prefix(plugin_id()?)))
            } else {
                Ok(None)
            }
        }
        StorageType::Plugin => Ok(Some(sha_prefix(plugin_id()?))),
        StorageType::Library => {
            let library = library.ok_or(ConfigError::LibraryContextRequired)?;
            let mut key_input = if descriptor.use_library_uuid {
                get_or_create_library_uuid(Utf8Path::new(&library.path))?
            } else if descriptor.use_library_name {
                library.name.clone()
            } else {
                library.path.clone()
            };
            if descriptor.this_plugin_only {
                key_input.push_str(plugin_id()?);
            }
            Ok(Some(sha_prefix(&key_input)))
        }
    }
}
