//! The filter evaluator (spec.md §4.B). Pure, total, allocation-bounded
//! per call: no method ever throws, a type mismatch simply returns
//! `false` for that rule.

use crate::model::{FilterCondition, FilterRule, FilterTree, MatchMode, Property, RuleMethod};
use eaglecooler_extract::ItemSnapshot;
use regex::RegexBuilder;
use serde_json::Value;

/// Evaluate `filter` against `snapshot`.
pub fn evaluate(snapshot: &ItemSnapshot, filter: &FilterTree) -> bool {
    fold(&filter.match_mode, filter.conditions.iter(), |condition| {
        evaluate_condition(snapshot, condition)
    })
}

fn evaluate_condition(snapshot: &ItemSnapshot, condition: &FilterCondition) -> bool {
    fold(&condition.match_mode, condition.rules.iter(), |rule| {
        evaluate_rule(snapshot, rule)
    })
}

/// ALL of an empty sequence is true; ANY of an empty sequence is true
/// too (spec.md §3: "empty ... denotes match everything").
fn fold<'a, T>(mode: &MatchMode, mut items: impl Iterator<Item = &'a T>, pred: impl Fn(&'a T) -> bool) -> bool {
    match mode {
        MatchMode::All => items.all(pred),
        MatchMode::Any => {
            let mut any_item = false;
            let mut matched = false;
            for item in &mut items {
                any_item = true;
                if pred(item) {
                    matched = true;
                    break;
                }
            }
            !any_item || matched
        }
    }
}

fn property_value(snapshot: &ItemSnapshot, property: Property) -> Value {
    match property {
        Property::Id => Value::String(snapshot.id.clone()),
        Property::Name => Value::String(snapshot.name.clone()),
        Property::Ext => Value::String(snapshot.ext.clone()),
        Property::Url => Value::String(snapshot.url.clone()),
        Property::Annotation => Value::String(snapshot.annotation.clone()),
        Property::Tags => Value::Array(snapshot.tags.iter().cloned().map(Value::String).collect()),
        Property::Folders => {
            Value::Array(snapshot.folders.iter().cloned().map(Value::String).collect())
        }
        Property::Star => snapshot.star.map(Value::from).unwrap_or(Value::Null),
        Property::Width => Value::from(snapshot.width),
        Property::Height => Value::from(snapshot.height),
        Property::Size => Value::from(snapshot.size),
        Property::ImportedAt => Value::from(snapshot.imported_at),
        Property::ModifiedAt => Value::from(snapshot.modified_at),
        Property::IsDeleted => Value::Bool(snapshot.is_deleted),
    }
}

fn evaluate_rule(snapshot: &ItemSnapshot, rule: &FilterRule) -> bool {
    let v = property_value(snapshot, rule.property);
    let r = rule.value.as_ref();

    match rule.method {
        RuleMethod::Is => r.is_some_and(|r| &v == r),
        RuleMethod::IsNot => r.is_some_and(|r| &v != r),
        RuleMethod::Contains => string_check(&v, r, |s, r| s.contains(r)),
        RuleMethod::NotContains => !string_check(&v, r, |s, r| s.contains(r)) && v.is_string(),
        RuleMethod::StartsWith => string_check(&v, r, |s, r| s.starts_with(r)),
        RuleMethod::EndsWith => string_check(&v, r, |s, r| s.ends_with(r)),
        RuleMethod::Matches => matches_regex(&v, r),
        RuleMethod::Gt => numeric_cmp(&v, r, |a, b| a > b),
        RuleMethod::Gte => numeric_cmp(&v, r, |a, b| a >= b),
        RuleMethod::Lt => numeric_cmp(&v, r, |a, b| a < b),
        RuleMethod::Lte => numeric_cmp(&v, r, |a, b| a <= b),
        RuleMethod::Between => between(&v, r),
        RuleMethod::IsEmpty => is_empty(&v),
        RuleMethod::IsNotEmpty => !is_empty(&v),
        RuleMethod::IncludesAny => set_cmp(&v, r, SetCmp::IncludesAny),
        RuleMethod::IncludesAll => set_cmp(&v, r, SetCmp::IncludesAll),
        RuleMethod::ExcludesAny => set_cmp(&v, r, SetCmp::ExcludesAny),
        RuleMethod::ExcludesAll => set_cmp(&v, r, SetCmp::ExcludesAll),
    }
}

fn string_check(v: &Value, r: Option<&Value>, check: impl Fn(&str, &str) -> bool) -> bool {
    match (v.as_str(), r.and_then(Value::as_str).map(String::from).or_else(|| r.map(stringify))) {
        (Some(s), Some(r)) => check(s, &r),
        _ => false,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn matches_regex(v: &Value, r: Option<&Value>) -> bool {
    let (Some(s), Some(pattern)) = (v.as_str(), r.and_then(Value::as_str)) else {
        return false;
    };
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map(|re| re.is_match(s))
        .unwrap_or(false)
}

fn as_f64(value: &Value) -> Option<f64> {
    value.as_f64()
}

fn numeric_cmp(v: &Value, r: Option<&Value>, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (as_f64(v), r.and_then(as_f64)) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

fn between(v: &Value, r: Option<&Value>) -> bool {
    let Some(value) = as_f64(v) else { return false };
    let Some(pair) = r.and_then(Value::as_array) else {
        return false;
    };
    let [min, max] = pair.as_slice() else { return false };
    match (as_f64(min), as_f64(max)) {
        (Some(min), Some(max)) => value >= min && value <= max,
        _ => false,
    }
}

fn is_empty(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

enum SetCmp {
    IncludesAny,
    IncludesAll,
    ExcludesAny,
    ExcludesAll,
}

fn set_cmp(v: &Value, r: Option<&Value>, mode: SetCmp) -> bool {
    let (Some(v), Some(r)) = (v.as_array(), r.and_then(Value::as_array)) else {
        return false;
    };
    match mode {
        SetCmp::IncludesAny => r.iter().any(|e| v.contains(e)),
        SetCmp::IncludesAll => r.iter().all(|e| v.contains(e)),
        SetCmp::ExcludesAny => r.iter().any(|e| !v.contains(e)),
        SetCmp::ExcludesAll => r.iter().all(|e| !v.contains(e)),
    }
}
