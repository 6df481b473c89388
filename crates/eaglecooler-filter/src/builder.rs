//! A two-state fluent builder for [`FilterTree`]s (spec.md §4.B).
//!
//! [`FilterBuilder`] is the conditions surface: `where_`/`and`/`or` each
//! return a [`RuleBuilder`], the terminator surface, whose methods
//! consume it and hand a [`FilterBuilder`] back. The two types can never
//! be confused for one another, so a half-built rule (a property with no
//! method yet applied) cannot be passed to [`FilterBuilder::build`].

use crate::model::{FilterCondition, FilterRule, FilterTree, MatchMode, Property, RuleMethod};
use serde_json::Value;

/// Conditions surface: combine, nest, and finish filter trees.
#[derive(Debug, Clone)]
pub struct FilterBuilder {
    conditions: Vec<FilterCondition>,
    pending: FilterCondition,
    match_mode: MatchMode,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            pending: FilterCondition::new(MatchMode::All),
            match_mode: MatchMode::All,
        }
    }

    /// Set the top-level match mode between conditions. Defaults to `All`.
    pub fn set_match(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Append an already-built condition as-is.
    pub fn add_condition(mut self, condition: FilterCondition) -> Self {
        self.flush();
        self.conditions.push(condition);
        self
    }

    fn flush(&mut self) {
        if !self.pending.rules.is_empty() {
            let finished = std::mem::replace(&mut self.pending, FilterCondition::new(MatchMode::All));
            self.conditions.push(finished);
        }
    }

    /// Start a new condition with its first rule targeting `property`.
    pub fn where_(mut self, property: Property) -> RuleBuilder {
        self.flush();
        RuleBuilder {
            builder: self,
            property,
        }
    }

    /// Add another rule to the current condition, ANDed with the rest.
    pub fn and(mut self, property: Property) -> RuleBuilder {
        self.pending.match_mode = MatchMode::All;
        RuleBuilder {
            builder: self,
            property,
        }
    }

    /// Start a new condition and set the top-level match mode to `Any`.
    pub fn or(mut self, property: Property) -> RuleBuilder {
        self.flush();
        self.match_mode = MatchMode::Any;
        RuleBuilder {
            builder: self,
            property,
        }
    }

    pub fn build(mut self) -> FilterTree {
        self.flush();
        FilterTree {
            conditions: self.conditions,
            match_mode: self.match_mode,
        }
    }
}

impl Default for FilterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminator surface: pick a rule method to complete the pending rule.
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    builder: FilterBuilder,
    property: Property,
}

impl RuleBuilder {
    fn push(mut self, method: RuleMethod, value: Option<Value>) -> FilterBuilder {
        self.builder.pending.rules.push(FilterRule {
            property: self.property,
            method,
            value,
        });
        self.builder
    }

    pub fn is(self, value: impl Into<Value>) -> FilterBuilder {
        self.push(RuleMethod::Is, Some(value.into()))
    }

    pub fn is_not(self, value: impl Into<Value>) -> FilterBuilder {
        self.push(RuleMethod::IsNot, Some(value.into()))
    }

    pub fn contains(self, value: impl Into<String>) -> FilterBuilder {
        self.push(RuleMethod::Contains, Some(Value::String(value.into())))
    }

    pub fn not_contains(self, value: impl Into<String>) -> FilterBuilder {
        self.push(RuleMethod::NotContains, Some(Value::String(value.into())))
    }

    pub fn starts_with(self, value: impl Into<String>) -> FilterBuilder {
        self.push(RuleMethod::StartsWith, Some(Value::String(value.into())))
    }

    pub fn ends_with(self, value: impl Into<String>) -> FilterBuilder {
        self.push(RuleMethod::EndsWith, Some(Value::String(value.into())))
    }

    pub fn matches(self, pattern: impl Into<String>) -> FilterBuilder {
        self.push(RuleMethod::Matches, Some(Value::String(pattern.into())))
    }

    pub fn gt(self, value: f64) -> FilterBuilder {
        self.push(RuleMethod::Gt, Some(Value::from(value)))
    }

    pub fn gte(self, value: f64) -> FilterBuilder {
        self.push(RuleMethod::Gte, Some(Value::from(value)))
    }

    pub fn lt(self, value: f64) -> FilterBuilder {
        self.push(RuleMethod::Lt, Some(Value::from(value)))
    }

    pub fn lte(self, value: f64) -> FilterBuilder {
        self.push(RuleMethod::Lte, Some(Value::from(value)))
    }

    pub fn between(self, min: f64, max: f64) -> FilterBuilder {
        self.push(
            RuleMethod::Between,
            Some(Value::Array(vec![Value::from(min), Value::from(max)])),
        )
    }

    pub fn is_empty(self) -> FilterBuilder {
        self.push(RuleMethod::IsEmpty, None)
    }

    pub fn is_not_empty(self) -> FilterBuilder {
        self.push(RuleMethod::IsNotEmpty, None)
    }

    pub fn includes_any(self, values: Vec<String>) -> FilterBuilder {
        self.push(RuleMethod::IncludesAny, Some(string_array(values)))
    }

    pub fn includes_all(self, values: Vec<String>) -> FilterBuilder {
        self.push(RuleMethod::IncludesAll, Some(string_array(values)))
    }

    pub fn excludes_any(self, values: Vec<String>) -> FilterBuilder {
        self.push(RuleMethod::ExcludesAny, Some(string_array(values)))
    }

    pub fn excludes_all(self, values: Vec<String>) -> FilterBuilder {
        self.push(RuleMethod::ExcludesAll, Some(string_array(values)))
    }
}

fn string_array(values: Vec<String>) -> Value {
    Value::Array(values.into_iter().map(Value::String).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MatchMode;

    #[test]
    fn single_rule_condition() {
        let tree = FilterBuilder::new().where_(Property::Ext).is("png").build();
        assert_eq!(tree.conditions.len(), 1);
        assert_eq!(tree.conditions[0].rules.len(), 1);
        assert_eq!(tree.conditions[0].rules[0].method, RuleMethod::Is);
    }

    #[test]
    fn and_keeps_rules_in_one_condition() {
        let tree = FilterBuilder::new()
            .where_(Property::Tags)
            .includes_any(vec!["photo".into()])
            .and(Property::Star)
            .gte(4.0)
            .build();
        assert_eq!(tree.conditions.len(), 1);
        assert_eq!(tree.conditions[0].rules.len(), 2);
        assert_eq!(tree.conditions[0].match_mode, MatchMode::All);
    }

    #[test]
    fn where_after_where_starts_new_condition() {
        let tree = FilterBuilder::new()
            .where_(Property::Ext)
            .is("png")
            .where_(Property::Star)
            .gte(4.0)
            .build();
        assert_eq!(tree.conditions.len(), 2);
    }

    #[test]
    fn or_starts_new_condition_and_sets_top_level_mode_to_any() {
        let tree = FilterBuilder::new()
            .where_(Property::Ext)
            .is("png")
            .or(Property::Ext)
            .is("jpg")
            .build();
        assert_eq!(tree.conditions.len(), 2);
        assert_eq!(tree.match_mode, MatchMode::Any);
    }

    #[test]
    fn empty_builder_matches_everything() {
        let tree = FilterBuilder::new().build();
        assert_eq!(tree, FilterTree::empty());
    }
}
