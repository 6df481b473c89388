//! Filter tree types, serializing to the JSON schema in spec.md §6.

use serde::{Deserialize, Serialize};

/// Top-level / per-condition conjunction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    #[serde(rename = "AND")]
    All,
    #[serde(rename = "OR")]
    Any,
}

/// The closed set of item properties a rule may target (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    Id,
    Name,
    Ext,
    Url,
    Annotation,
    Tags,
    Folders,
    Star,
    Width,
    Height,
    Size,
    ImportedAt,
    ModifiedAt,
    IsDeleted,
}

/// The closed set of rule methods (spec.md §4.B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleMethod {
    Is,
    IsNot,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Matches,
    Gt,
    Gte,
    Lt,
    Lte,
    Between,
    IsEmpty,
    IsNotEmpty,
    IncludesAny,
    IncludesAll,
    ExcludesAny,
    ExcludesAll,
}

/// `(property, method, value?)`. `value` is omitted for `isEmpty` /
/// `isNotEmpty`, a two-element array for `between`, a string/array for
/// the rest depending on `method`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRule {
    pub property: Property,
    pub method: RuleMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// A match mode over an ordered sequence of rules. Empty `rules` matches
/// everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub rules: Vec<FilterRule>,
    #[serde(rename = "match")]
    pub match_mode: MatchMode,
}

impl FilterCondition {
    pub fn new(match_mode: MatchMode) -> Self {
        Self {
            rules: Vec::new(),
            match_mode,
        }
    }
}

/// A match mode over an ordered sequence of conditions. Empty
/// `conditions` matches everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterTree {
    pub conditions: Vec<FilterCondition>,
    #[serde(rename = "match")]
    pub match_mode: MatchMode,
}

impl FilterTree {
    pub fn empty() -> Self {
        Self {
            conditions: Vec::new(),
            match_mode: MatchMode::All,
        }
    }
}

impl Default for FilterTree {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_match_mode_as_and_or() {
        assert_eq!(serde_json::to_value(MatchMode::All).unwrap(), "AND");
        assert_eq!(serde_json::to_value(MatchMode::Any).unwrap(), "OR");
    }

    #[test]
    fn property_and_method_serialize_as_lower_camel_case() {
        assert_eq!(serde_json::to_value(Property::ImportedAt).unwrap(), "importedAt");
        assert_eq!(serde_json::to_value(Property::IsDeleted).unwrap(), "isDeleted");
        assert_eq!(serde_json::to_value(RuleMethod::IsNot).unwrap(), "isNot");
        assert_eq!(
            serde_json::to_value(RuleMethod::IncludesAny).unwrap(),
            "includesAny"
        );
    }

    #[test]
    fn empty_filter_round_trips() {
        let tree = FilterTree::empty();
        let json = serde_json::to_string(&tree).unwrap();
        let back: FilterTree = serde_json::from_str(&json).unwrap();
        assert_eq!(tree, back);
    }
}
