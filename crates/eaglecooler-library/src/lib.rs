//! Direct, file-backed view of the host's on-disk library (spec.md §4.C).

pub mod core;
pub mod document;
pub mod error;
pub mod indexes;
pub mod items;
pub mod paths;
pub mod url_shortcut;

pub use core::{read_library_metadata, update_library_metadata};
pub use document::{
    add, get_by_id, quick_access_add, quick_access_remove, remove, tag_group_add, tag_group_remove,
    tag_group_update, update, LibraryDocument, QuickAccessEntry,
};
pub use error::LibraryError;
pub use indexes::{MtimeIndex, TagsIndex};
pub use items::{find_existing_url_companion, list_item_ids, read_item, write_item, ItemMetadata, WriteOptions};
pub use paths::LibraryPaths;
