//! Core layer: read and clone-mutate-replace the library document
//! (spec.md §4.C).

use crate::document::LibraryDocument;
use crate::error::LibraryError;
use crate::paths::LibraryPaths;
use eaglecooler_utils::json_file::{read_json, write_json_pretty};

/// Parse the library document. Missing file or malformed JSON both
/// surface as an error — the core never fabricates an empty document
/// for this read (spec.md §7).
pub fn read_library_metadata(paths: &LibraryPaths) -> Result<LibraryDocument, LibraryError> {
    Ok(read_json(&paths.metadata_json())?)
}

/// Read the current document, deep-clone it, apply `mutate` to the
/// clone, write the clone back, and return it. The clone has no
/// structural sharing with the value `mutate` was given to modify: the
/// original document this function read is left untouched in the
/// caller's hands.
pub fn update_library_metadata(
    paths: &LibraryPaths,
    mutate: impl FnOnce(&mut LibraryDocument),
) -> Result<LibraryDocument, LibraryError> {
    let current = read_library_metadata(paths)?;
    let mut next = current.clone();
    mutate(&mut next);
    write_json_pretty(&paths.metadata_json(), &next)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_doc(paths: &LibraryPaths, doc: &LibraryDocument) {
        write_json_pretty(&paths.metadata_json(), doc).unwrap();
    }

    #[test]
    fn read_surfaces_missing_file_as_error() {
        let dir = TempDir::new().unwrap();
        let paths = LibraryPaths::new(camino::Utf8Path::from_path(dir.path()).unwrap());
        assert!(read_library_metadata(&paths).is_err());
    }

    #[test]
    fn update_mutates_a_clone_and_persists_it() {
        let dir = TempDir::new().unwrap();
        let paths = LibraryPaths::new(camino::Utf8Path::from_path(dir.path()).unwrap());
        let original = LibraryDocument {
            folders: vec![json!({"id": "a"})],
            application_version: "1.0.0".into(),
            ..Default::default()
        };
        write_doc(&paths, &original);

        let updated = update_library_metadata(&paths, |doc| {
            doc.folders.push(json!({"id": "b"}));
        })
        .unwrap();

        assert_eq!(original.folders.len(), 1, "original read value is untouched");
        assert_eq!(updated.folders.len(), 2);

        let reread = read_library_metadata(&paths).unwrap();
        assert_eq!(reread, updated);
    }
}
