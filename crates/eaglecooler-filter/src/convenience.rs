//! Named convenience constructors and tree-combining operators
//! (spec.md §4.B's "common filter shapes").

use crate::builder::FilterBuilder;
use crate::model::{FilterTree, MatchMode, Property};

pub fn by_tags(tags: Vec<String>) -> FilterTree {
    FilterBuilder::new()
        .where_(Property::Tags)
        .includes_any(tags)
        .build()
}

pub fn by_folders(folder_ids: Vec<String>) -> FilterTree {
    FilterBuilder::new()
        .where_(Property::Folders)
        .includes_any(folder_ids)
        .build()
}

pub fn by_name_regex(pattern: impl Into<String>) -> FilterTree {
    FilterBuilder::new()
        .where_(Property::Name)
        .matches(pattern)
        .build()
}

pub fn by_extension(ext: impl Into<String>) -> FilterTree {
    let ext = ext.into();
    let ext = ext.strip_prefix('.').unwrap_or(&ext).to_string();
    FilterBuilder::new().where_(Property::Ext).is(ext).build()
}

pub fn by_min_rating(min_star: f64) -> FilterTree {
    FilterBuilder::new().where_(Property::Star).gte(min_star).build()
}

pub fn untagged() -> FilterTree {
    FilterBuilder::new().where_(Property::Tags).is_empty().build()
}

pub fn unfiled() -> FilterTree {
    FilterBuilder::new().where_(Property::Folders).is_empty().build()
}

pub fn by_import_date_range(from_ms: f64, to_ms: f64) -> FilterTree {
    FilterBuilder::new()
        .where_(Property::ImportedAt)
        .between(from_ms, to_ms)
        .build()
}

/// Combine two filter trees as `a AND b`, nesting each as its own
/// condition so their internal match modes are preserved.
pub fn and_combine(a: FilterTree, b: FilterTree) -> FilterTree {
    combine(a, b, MatchMode::All)
}

/// Combine two filter trees as `a OR b`.
pub fn or_combine(a: FilterTree, b: FilterTree) -> FilterTree {
    combine(a, b, MatchMode::Any)
}

fn combine(a: FilterTree, b: FilterTree, mode: MatchMode) -> FilterTree {
    let mut conditions = a.conditions;
    conditions.extend(b.conditions);
    FilterTree {
        conditions,
        match_mode: mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::evaluate;
    use eaglecooler_extract::ItemSnapshot;

    fn item() -> ItemSnapshot {
        ItemSnapshot {
            id: "a".into(),
            name: "wallpaper.png".into(),
            ext: "png".into(),
            url: String::new(),
            annotation: String::new(),
            width: 0,
            height: 0,
            size: 0,
            star: Some(5),
            imported_at: 0,
            modified_at: 0,
            tags: vec![],
            folders: vec![],
            is_deleted: false,
        }
    }

    #[test]
    fn untagged_matches_item_with_no_tags() {
        assert!(evaluate(&item(), &untagged()));
    }

    #[test]
    fn by_extension_matches_exact_ext() {
        assert!(evaluate(&item(), &by_extension("png")));
        assert!(!evaluate(&item(), &by_extension("jpg")));
    }

    #[test]
    fn by_extension_strips_leading_dot() {
        assert!(evaluate(&item(), &by_extension(".png")));
        assert_eq!(by_extension(".png"), by_extension("png"));
    }

    #[test]
    fn or_combine_matches_if_either_side_matches() {
        let tree = or_combine(by_extension("jpg"), by_extension("png"));
        assert!(evaluate(&item(), &tree));
    }

    #[test]
    fn and_combine_requires_both_sides() {
        let tree = and_combine(by_extension("png"), by_min_rating(6.0));
        assert!(!evaluate(&item(), &tree));
    }
}
