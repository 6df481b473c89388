//! The two derived indexes maintained on item write (spec.md §3, §4.C).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `{library-root}/mtime.json` — flat id→epoch-ms map. The optional
/// aggregate `"all"` entry is just another key; it carries no special
/// structural treatment here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MtimeIndex(pub HashMap<String, i64>);

impl MtimeIndex {
    pub fn set(&mut self, id: impl Into<String>, epoch_ms: i64) {
        self.0.insert(id.into(), epoch_ms);
    }
}

/// `{library-root}/tags.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagsIndex {
    pub history_tags: Vec<String>,
    pub starred_tags: Vec<String>,
}

impl TagsIndex {
    /// Insertion-unique add: no-op if `tag` is already present.
    pub fn record_history_tag(&mut self, tag: &str) {
        if !self.history_tags.iter().any(|t| t == tag) {
            self.history_tags.push(tag.to_string());
        }
    }
}
