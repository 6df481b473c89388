//! Scoped key/value config store backed by shared JSON files
//! (spec.md §4.D).

pub mod error;
pub mod plugin_context;
pub mod scope;
pub mod store;
pub mod uuid_file;

pub use error::ConfigError;
pub use plugin_context::{init_plugin_context, plugin_id};
pub use scope::{config_file_name, section_key, sha_prefix, LibraryIdentity, ScopeDescriptor, StorageType};
pub use store::ConfigStore;
pub use uuid_file::get_or_create_library_uuid;
