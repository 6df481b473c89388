//! Declarative AND/OR predicate DSL over item snapshots (spec.md §4.B).

pub mod builder;
pub mod convenience;
pub mod eval;
pub mod model;

pub use builder::{FilterBuilder, RuleBuilder};
pub use convenience::{
    and_combine, by_extension, by_folders, by_import_date_range, by_min_rating, by_name_regex,
    by_tags, or_combine, unfiled, untagged,
};
pub use eval::evaluate;
pub use model::{FilterCondition, FilterRule, FilterTree, MatchMode, Property, RuleMethod};
