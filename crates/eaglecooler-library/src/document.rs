//! The library document and the three per-entity layers over it
//! (spec.md §4.C: folders, smart-folders, tag-groups, quick-access).
//!
//! Forest nodes and tag-group/quick-access entries are arbitrary JSON
//! objects beyond their identifying fields — the host owns their shape,
//! the core only locates and shallow-merges them — so they are modeled
//! as [`serde_json::Value`] rather than a closed struct.

use crate::error::LibraryError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `{library-root}/metadata.json` (spec.md §3 "Library document").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryDocument {
    #[serde(default)]
    pub folders: Vec<Value>,
    #[serde(default)]
    pub smart_folders: Vec<Value>,
    #[serde(default)]
    pub quick_access_list: Vec<Value>,
    #[serde(default)]
    pub tag_groups: Vec<Value>,
    #[serde(default)]
    pub modification_time: i64,
    #[serde(default)]
    pub application_version: String,
}

/// Depth-first search through `forest`'s nested `children`, returning the
/// first node whose `id` matches.
pub fn get_by_id<'a>(forest: &'a [Value], id: &str) -> Option<&'a Value> {
    for node in forest {
        if node.get("id").and_then(Value::as_str) == Some(id) {
            return Some(node);
        }
        if let Some(children) = node.get("children").and_then(Value::as_array) {
            if let Some(found) = get_by_id(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn get_by_id_mut<'a>(forest: &'a mut [Value], id: &str) -> Option<&'a mut Value> {
    for node in forest {
        if node.get("id").and_then(Value::as_str) == Some(id) {
            return Some(node);
        }
        if let Some(children) = node.get_mut("children").and_then(Value::as_array_mut) {
            if let Some(found) = get_by_id_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Append `node` to the root sequence, or to the `children` of the node
/// named by `parent_id` if present (initializing `children` to an empty
/// sequence if it doesn't already exist).
pub fn add(forest: &mut Vec<Value>, node: Value, parent_id: Option<&str>) -> Result<(), LibraryError> {
    match parent_id {
        None => {
            forest.push(node);
            Ok(())
        }
        Some(parent_id) => {
            let parent =
                get_by_id_mut(forest, parent_id).ok_or_else(|| LibraryError::not_found("parent", parent_id))?;
            let parent_obj = parent
                .as_object_mut()
                .expect("forest nodes are always JSON objects");
            parent_obj
                .entry("children")
                .or_insert_with(|| Value::Array(Vec::new()))
                .as_array_mut()
                .expect("children is always an array")
                .push(node);
            Ok(())
        }
    }
}

/// Shallow-merge `patch` into the node identified by `id`.
pub fn update(forest: &mut [Value], id: &str, patch: Map<String, Value>) -> Result<(), LibraryError> {
    let node = get_by_id_mut(forest, id).ok_or_else(|| LibraryError::not_found("node", id))?;
    let obj = node.as_object_mut().expect("forest nodes are always JSON objects");
    for (key, value) in patch {
        obj.insert(key, value);
    }
    Ok(())
}

/// Rebuild the forest, dropping the node with `id` at every level
/// (recursively through `children`).
pub fn remove(forest: &[Value], id: &str) -> Vec<Value> {
    forest
        .iter()
        .filter(|node| node.get("id").and_then(Value::as_str) != Some(id))
        .cloned()
        .map(|mut node| {
            if let Some(children) = node.get("children").and_then(Value::as_array).cloned() {
                let pruned = remove(&children, id);
                node.as_object_mut()
                    .expect("forest nodes are always JSON objects")
                    .insert("children".to_string(), Value::Array(pruned));
            }
            node
        })
        .collect()
}

/// A quick-access entry, keyed by `(type, id)`; everything else is
/// arbitrary, host-owned payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickAccessEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Append `entry`, replacing any existing entry with the same
/// `(type, id)` key.
pub fn quick_access_add(list: &mut Vec<Value>, entry: QuickAccessEntry) -> Result<(), LibraryError> {
    let rendered = serde_json::to_value(&entry).expect("QuickAccessEntry always serializes");
    list.retain(|existing| !is_quick_access_match(existing, &entry.kind, &entry.id));
    list.push(rendered);
    Ok(())
}

/// Remove the entry with the given `(type, id)` key, if present.
pub fn quick_access_remove(list: &mut Vec<Value>, kind: &str, id: &str) -> bool {
    let before = list.len();
    list.retain(|entry| !is_quick_access_match(entry, kind, id));
    list.len() != before
}

fn is_quick_access_match(entry: &Value, kind: &str, id: &str) -> bool {
    entry.get("type").and_then(Value::as_str) == Some(kind)
        && entry.get("id").and_then(Value::as_str) == Some(id)
}

/// Append a tag-group entry.
pub fn tag_group_add(list: &mut Vec<Value>, group: Value) {
    list.push(group);
}

/// Shallow-merge `patch` into the tag-group identified by `id`.
pub fn tag_group_update(list: &mut [Value], id: &str, patch: Map<String, Value>) -> Result<(), LibraryError> {
    let group = list
        .iter_mut()
        .find(|g| g.get("id").and_then(Value::as_str) == Some(id))
        .ok_or_else(|| LibraryError::not_found("tag group", id))?;
    let obj = group.as_object_mut().expect("tag groups are always JSON objects");
    for (key, value) in patch {
        obj.insert(key, value);
    }
    Ok(())
}

/// Remove the tag-group identified by `id`, if present.
pub fn tag_group_remove(list: &mut Vec<Value>, id: &str) {
    list.retain(|g| g.get("id").and_then(Value::as_str) != Some(id));
}
