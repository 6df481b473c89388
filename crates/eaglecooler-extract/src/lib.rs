//! Record Extractor: projects accessor-only host records into plain,
//! serializable snapshots (spec.md §4.A).

pub mod record;
pub mod snapshot;

pub use record::{extract_folder, extract_item, FolderRecord, ItemRecord, LibraryContext};
pub use snapshot::{FolderSnapshot, ItemSnapshot, LibraryState};
