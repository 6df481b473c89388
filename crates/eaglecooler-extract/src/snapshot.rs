//! Plain, serializable projections of host records (spec.md §3).

use serde::{Deserialize, Serialize};

/// Immutable projection of a host item.
///
/// `star` preserves numeric absence as a distinguished "no rating" value
/// rather than coercing to zero; `tags` and `folders` are always present,
/// possibly empty, sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSnapshot {
    pub id: String,
    pub name: String,
    pub ext: String,
    pub url: String,
    pub annotation: String,
    pub width: i64,
    pub height: i64,
    pub size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star: Option<i64>,
    pub imported_at: i64,
    pub modified_at: i64,
    pub tags: Vec<String>,
    pub folders: Vec<String>,
    /// Sourced from the item metadata record's deletion flag (§3). Carried
    /// here, not just in Bare Library I/O, because the Filter Engine's
    /// closed property set (§6) names `isDeleted` as a filterable item
    /// property and filters operate over Record Extractor snapshots.
    #[serde(default)]
    pub is_deleted: bool,
}

/// Immutable projection of a host folder. `children` is a shallow
/// reference to the nested forest — deep extraction is the caller's
/// responsibility (spec.md §4.A).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderSnapshot {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub icon_color: String,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub children: Vec<FolderSnapshot>,
}

/// `{path, name}` projection of the host's currently open library.
///
/// Missing/inaccessible host context yields `{path: "", name: ""}` rather
/// than an error (spec.md §4.A).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryState {
    pub path: String,
    pub name: String,
}
