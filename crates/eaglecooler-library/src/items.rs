//! Items layer: per-item metadata, the `.url` companion, and index
//! maintenance (spec.md §4.C).

use crate::error::LibraryError;
use crate::indexes::{MtimeIndex, TagsIndex};
use crate::paths::LibraryPaths;
use crate::url_shortcut::{parse_url_shortcut, render_url_shortcut};
use camino::Utf8PathBuf;
use eaglecooler_utils::error::FileError;
use eaglecooler_utils::json_file::{read_json, read_json_or_default, write_json_pretty};
use eaglecooler_utils::time::now_millis;
use serde::{Deserialize, Serialize};
use std::fs;

/// `{library-root}/images/{id}.info/metadata.json` (spec.md §3 "Item
/// metadata record").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    pub id: String,
    pub name: String,
    pub size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub btime: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtime: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modification_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<i64>,
    pub ext: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub folders: Vec<String>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub annotation: String,
}

/// Options for [`write_item`]; both default on.
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    pub write_url_companion: bool,
    pub update_indexes: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            write_url_companion: true,
            update_indexes: true,
        }
    }
}

/// Locate an existing `*.url` file inside the item directory, if any.
pub fn find_existing_url_companion(paths: &LibraryPaths, id: &str) -> Option<Utf8PathBuf> {
    let dir = paths.item_dir(id);
    let entries = fs::read_dir(dir.as_std_path()).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("url") {
            return Utf8PathBuf::from_path_buf(path).ok();
        }
    }
    None
}

/// Read per-item metadata. If `ext == "url"` and `url` is absent/empty,
/// parse the `.url` companion and populate `url` before returning.
pub fn read_item(paths: &LibraryPaths, id: &str) -> Result<ItemMetadata, LibraryError> {
    let mut metadata: ItemMetadata = read_json(&paths.item_metadata_json(id))?;

    if metadata.ext == "url" && metadata.url.is_empty() {
        let companion = find_existing_url_companion(paths, id).unwrap_or_else(|| paths.item_url_companion(id));
        if let Ok(content) = fs::read_to_string(companion.as_std_path()) {
            if let Some(url) = parse_url_shortcut(&content) {
                metadata.url = url;
            }
        }
    }

    Ok(metadata)
}

/// Write per-item metadata. Per spec.md §7, this does not create the
/// per-item directory implicitly — the caller is responsible for that.
pub fn write_item(
    paths: &LibraryPaths,
    id: &str,
    data: &ItemMetadata,
    options: WriteOptions,
) -> Result<(), LibraryError> {
    let dir = paths.item_dir(id);
    if !dir.exists() {
        return Err(LibraryError::File(FileError::io(
            dir.as_str(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "item directory does not exist"),
        )));
    }

    write_json_pretty(&paths.item_metadata_json(id), data)?;

    if options.write_url_companion && data.ext == "url" {
        let companion = find_existing_url_companion(paths, id).unwrap_or_else(|| paths.item_url_companion(id));
        fs::write(companion.as_std_path(), render_url_shortcut(&data.url))
            .map_err(|e| FileError::io(companion.as_str(), e))?;
    }

    if options.update_indexes {
        let mut mtime_index: MtimeIndex = read_json_or_default(&paths.mtime_json());
        let stamp = data.last_modified.or(data.modification_time).unwrap_or_else(now_millis);
        mtime_index.set(id, stamp);
        write_json_pretty(&paths.mtime_json(), &mtime_index)?;

        let mut tags_index: TagsIndex = read_json_or_default(&paths.tags_json());
        for tag in &data.tags {
            tags_index.record_history_tag(tag);
        }
        write_json_pretty(&paths.tags_json(), &tags_index)?;
    }

    Ok(())
}

/// Enumerate `images/` subdirectories named `{id}.info` and return the
/// `{id}` stems.
pub fn list_item_ids(paths: &LibraryPaths) -> Result<Vec<String>, LibraryError> {
    let images_dir = paths.images_dir();
    let entries = match fs::read_dir(images_dir.as_std_path()) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(FileError::io(images_dir.as_str(), e).into()),
    };

    let mut ids = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FileError::io(images_dir.as_str(), e))?;
        if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if let Some(stem) = name.strip_suffix(".info") {
                ids.push(stem.to_string());
            }
        }
    }
    ids.sort();
    Ok(ids)
}
