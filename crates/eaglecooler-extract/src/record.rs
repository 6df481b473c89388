//! The Record Extractor (spec.md §4.A).
//!
//! Host records expose their fields only through accessor methods, never
//! through an enumerable/structural shape — a plain `#[derive(Clone)]` or
//! a reflective copy over such a record silently produces an empty value.
//! Every field this crate projects is therefore named explicitly here;
//! no field list is ever derived by iteration.

use crate::snapshot::{FolderSnapshot, ItemSnapshot, LibraryState};

/// A host item record reachable only through accessors.
pub trait ItemRecord {
    fn id(&self) -> String;
    fn name(&self) -> String;
    fn ext(&self) -> String;
    fn url(&self) -> String;
    fn annotation(&self) -> String;
    fn width(&self) -> i64;
    fn height(&self) -> i64;
    fn size(&self) -> i64;
    fn star(&self) -> Option<i64>;
    fn imported_at(&self) -> i64;
    fn modified_at(&self) -> i64;
    fn tags(&self) -> Vec<String>;
    fn folders(&self) -> Vec<String>;
    fn is_deleted(&self) -> bool;
}

/// A host folder record reachable only through accessors. `children` is
/// handed back as already-extracted snapshots — the host is expected to
/// expose its child list as live records the caller has already walked,
/// matching spec.md's "shallow, caller walks deeper" contract.
pub trait FolderRecord {
    fn id(&self) -> String;
    fn name(&self) -> String;
    fn description(&self) -> String;
    fn icon(&self) -> String;
    fn icon_color(&self) -> String;
    fn created_at(&self) -> i64;
    fn parent_id(&self) -> Option<String>;
    fn children(&self) -> Vec<FolderSnapshot>;
}

/// A host context able to report which library (if any) is currently open.
pub trait LibraryContext {
    fn path(&self) -> Option<String>;
    fn name(&self) -> Option<String>;
}

/// Project a host item record into a plain snapshot.
pub fn extract_item(record: &impl ItemRecord) -> ItemSnapshot {
    ItemSnapshot {
        id: record.id(),
        name: record.name(),
        ext: record.ext(),
        url: record.url(),
        annotation: record.annotation(),
        width: record.width(),
        height: record.height(),
        size: record.size(),
        star: record.star(),
        imported_at: record.imported_at(),
        modified_at: record.modified_at(),
        tags: record.tags(),
        folders: record.folders(),
        is_deleted: record.is_deleted(),
    }
}

/// Project a host folder record into a plain snapshot.
pub fn extract_folder(record: &impl FolderRecord) -> FolderSnapshot {
    FolderSnapshot {
        id: record.id(),
        name: record.name(),
        description: record.description(),
        icon: record.icon(),
        icon_color: record.icon_color(),
        created_at: record.created_at(),
        parent_id: record.parent_id(),
        children: record.children(),
    }
}

/// Project the host's current library identity. Missing or inaccessible
/// context yields an empty snapshot rather than an error.
pub fn library_state(context: &impl LibraryContext) -> LibraryState {
    LibraryState {
        path: context.path().unwrap_or_default(),
        name: context.name().unwrap_or_default(),
    }
}
