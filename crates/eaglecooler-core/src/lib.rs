//! Public facade over the five components: Record Extractor, Filter
//! Engine, Bare Library I/O, Scoped Config Store, and the Change
//! Subscription Manager. Each component is a standalone crate; this one
//! re-exports the surface an embedding plugin actually needs and composes
//! their error types behind [`CoreError`].

pub mod error;

pub use error::CoreError;

pub use eaglecooler_extract::{
    extract_folder, extract_item, FolderRecord, FolderSnapshot, ItemRecord, ItemSnapshot,
    LibraryContext, LibraryState,
};

pub use eaglecooler_filter::{
    and_combine, by_extension, by_folders, by_import_date_range, by_min_rating, by_name_regex,
    by_tags, evaluate, or_combine, unfiled, untagged, FilterBuilder, FilterCondition, FilterRule,
    FilterTree, MatchMode, Property, RuleBuilder, RuleMethod,
};

pub use eaglecooler_library::{
    add, find_existing_url_companion, get_by_id, list_item_ids, quick_access_add,
    quick_access_remove, read_item, read_library_metadata, remove, tag_group_add,
    tag_group_remove, tag_group_update, update, update_library_metadata, write_item, ItemMetadata,
    LibraryDocument, LibraryError, LibraryPaths, MtimeIndex, QuickAccessEntry, TagsIndex,
    WriteOptions,
};

pub use eaglecooler_config::{
    config_file_name, get_or_create_library_uuid, init_plugin_context, plugin_id, section_key,
    sha_prefix, ConfigError, ConfigStore, LibraryIdentity, ScopeDescriptor, StorageType,
};

pub use eaglecooler_subscribe::{
    stat_mtime_ms, ChangeEvent, MtimeSnapshot, SubscribeOptions, SubscriptionHandle,
    SubscriptionManager,
};

pub use eaglecooler_host::{clear_token_cache, HostApi, HttpClient, HttpError, PluginManifest, QueryValue, TokenProvider};
