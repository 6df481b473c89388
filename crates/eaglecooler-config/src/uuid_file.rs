//! `{library-root}/cooler-uuid.json` (spec.md §3 "Library UUID file").
//!
//! Created lazily on first access in UUID scoping mode; never deleted by
//! the core.

use crate::error::ConfigError;
use camino::Utf8Path;
use eaglecooler_utils::json_file::{read_json, write_json_pretty};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct UuidFile {
    uuid: String,
}

fn uuid_file_path(library_root: &Utf8Path) -> camino::Utf8PathBuf {
    library_root.join("cooler-uuid.json")
}

/// Read the library's persistent UUID, generating and persisting a fresh
/// version-4 UUID on first access.
pub fn get_or_create_library_uuid(library_root: &Utf8Path) -> Result<String, ConfigError> {
    let path = uuid_file_path(library_root);
    match read_json::<UuidFile>(&path) {
        Ok(doc) => Ok(doc.uuid),
        Err(e) if e.is_not_found() => {
            let uuid = Uuid::new_v4().to_string();
            write_json_pretty(&path, &UuidFile { uuid: uuid.clone() })?;
            Ok(uuid)
        }
        Err(e) => Err(e.into()),
    }
}
