//! Change detection between the current mirror and all prior snapshots
//!
//! Identity is basename-only. No side effects; pure set computation,
//! materialized in sorted order so snapshot output is deterministic.

use seisarc_core::Category;
use std::collections::BTreeSet;

/// New and deleted basenames for one file category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Present in the mirror, absent from every prior snapshot.
    pub new: Vec<String>,
    /// Archived previously, gone from the mirror.
    pub deleted: Vec<String>,
}

impl ChangeSet {
    /// `new = current − archived`, `deleted = archived − current`.
    pub fn compute(current: &BTreeSet<String>, archived: &BTreeSet<String>) -> ChangeSet {
        ChangeSet {
            new: current.difference(archived).cloned().collect(),
            deleted: archived.difference(current).cloned().collect(),
        }
    }

    /// True when nothing changed since the last snapshot.
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.deleted.is_empty()
    }
}

/// Per-category change sets for one station.
#[derive(Debug, Clone, Default)]
pub struct StationChanges {
    /// Waveform-category changes
    pub waveform: ChangeSet,
    /// Secondary-category changes
    pub secondary: ChangeSet,
}

impl StationChanges {
    /// The change set for one category.
    pub fn get(&self, category: Category) -> &ChangeSet {
        match category {
            Category::Waveform => &self.waveform,
            Category::Secondary => &self.secondary,
        }
    }

    /// True when neither category changed.
    pub fn is_empty(&self) -> bool {
        self.waveform.is_empty() && self.secondary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bootstrap_has_no_deletions() {
        let changes = ChangeSet::compute(&set(&["a", "b"]), &BTreeSet::new());
        assert_eq!(changes.new, vec!["a", "b"]);
        assert!(changes.deleted.is_empty());
    }

    #[test]
    fn unchanged_source_yields_empty_changeset() {
        let current = set(&["a", "b"]);
        let changes = ChangeSet::compute(&current, &current);
        assert!(changes.is_empty());
    }

    #[test]
    fn additions_and_removals_split() {
        let changes = ChangeSet::compute(&set(&["a", "c"]), &set(&["a", "b"]));
        assert_eq!(changes.new, vec!["c"]);
        assert_eq!(changes.deleted, vec!["b"]);
    }

    #[test]
    fn output_is_sorted() {
        let changes = ChangeSet::compute(&set(&["z", "a", "m"]), &BTreeSet::new());
        assert_eq!(changes.new, vec!["a", "m", "z"]);
    }

    proptest! {
        #[test]
        fn new_and_deleted_are_disjoint(
            current in proptest::collection::btree_set("[a-d]{1,2}", 0..8),
            archived in proptest::collection::btree_set("[a-d]{1,2}", 0..8),
        ) {
            let changes = ChangeSet::compute(&current, &archived);
            let new: BTreeSet<_> = changes.new.iter().collect();
            let deleted: BTreeSet<_> = changes.deleted.iter().collect();
            prop_assert!(new.is_disjoint(&deleted));
        }

        #[test]
        fn new_restores_current_when_joined_with_retained(
            current in proptest::collection::btree_set("[a-d]{1,2}", 0..8),
            archived in proptest::collection::btree_set("[a-d]{1,2}", 0..8),
        ) {
            let changes = ChangeSet::compute(&current, &archived);
            let mut rebuilt: BTreeSet<String> =
                current.intersection(&archived).cloned().collect();
            rebuilt.extend(changes.new.iter().cloned());
            prop_assert_eq!(rebuilt, current);
        }
    }
}
