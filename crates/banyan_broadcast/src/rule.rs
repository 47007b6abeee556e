//! Broadcast-table membership rule.
//!
//! The table set is the only shared mutable state on the routing path: many
//! request-handling tasks read it while the metadata-reload path replaces it.
//! Readers clone an `Arc` snapshot; the writer swaps the `Arc` wholesale, so
//! a reader sees either the pre-reload or post-reload set, never a torn one.

use std::collections::BTreeSet;
use std::sync::Arc;

use banyan_common::identifier::IdentifierCasePolicy;
use parking_lot::RwLock;

/// Immutable snapshot of the designated broadcast tables, names normalized
/// per the host database's casing policy at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastTableSet {
    policy: IdentifierCasePolicy,
    names: BTreeSet<String>,
}

impl BroadcastTableSet {
    pub fn new<I, S>(policy: IdentifierCasePolicy, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| policy.normalize(name.as_ref()))
            .collect();
        Self { policy, names }
    }

    pub fn contains(&self, table: &str) -> bool {
        self.names.contains(&self.policy.normalize(table))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Shared handle to the current broadcast-table snapshot.
pub struct BroadcastRule {
    policy: IdentifierCasePolicy,
    tables: RwLock<Arc<BroadcastTableSet>>,
}

impl BroadcastRule {
    pub fn new<I, S>(policy: IdentifierCasePolicy, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            policy,
            tables: RwLock::new(Arc::new(BroadcastTableSet::new(policy, names))),
        }
    }

    /// Current snapshot; valid for as long as the caller holds it even if a
    /// reload happens concurrently.
    pub fn snapshot(&self) -> Arc<BroadcastTableSet> {
        self.tables.read().clone()
    }

    /// Replace the table set wholesale. Concurrent readers keep whichever
    /// snapshot they already hold.
    pub fn reload<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = Arc::new(BroadcastTableSet::new(self.policy, names));
        let count = set.len();
        *self.tables.write() = set;
        tracing::info!(tables = count, "broadcast rule reloaded");
    }

    /// True iff `tables` is non-empty and every element is designated
    /// broadcast. The empty set returns false: with nothing to broadcast,
    /// "all" must not hold vacuously.
    pub fn is_all_broadcast_tables(&self, tables: &BTreeSet<String>) -> bool {
        if tables.is_empty() {
            return false;
        }
        let snapshot = self.snapshot();
        tables.iter().all(|table| snapshot.contains(table))
    }

    /// Intersection of `tables` with the broadcast set, normalized.
    pub fn filter_broadcast_table_names(&self, tables: &BTreeSet<String>) -> BTreeSet<String> {
        let snapshot = self.snapshot();
        tables
            .iter()
            .filter(|table| snapshot.contains(table))
            .map(|table| self.policy.normalize(table))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn rule() -> BroadcastRule {
        BroadcastRule::new(IdentifierCasePolicy::Insensitive, ["foo_tbl", "bar_tbl"])
    }

    #[test]
    fn test_is_all_broadcast_tables() {
        let rule = rule();
        assert!(rule.is_all_broadcast_tables(&names(&["foo_tbl"])));
        assert!(rule.is_all_broadcast_tables(&names(&["foo_tbl", "bar_tbl"])));
        assert!(!rule.is_all_broadcast_tables(&names(&["foo_tbl", "other_tbl"])));
        assert!(!rule.is_all_broadcast_tables(&names(&["other_tbl"])));
    }

    #[test]
    fn test_empty_set_is_never_all_broadcast() {
        assert!(!rule().is_all_broadcast_tables(&BTreeSet::new()));
    }

    #[test]
    fn test_filter_broadcast_table_names() {
        let rule = rule();
        assert_eq!(
            rule.filter_broadcast_table_names(&names(&["foo_tbl", "other_tbl"])),
            names(&["foo_tbl"])
        );
        assert!(rule.filter_broadcast_table_names(&names(&["other_tbl"])).is_empty());
    }

    #[test]
    fn test_case_insensitive_membership() {
        let rule = rule();
        assert!(rule.is_all_broadcast_tables(&names(&["FOO_TBL"])));
        assert_eq!(
            rule.filter_broadcast_table_names(&names(&["FOO_TBL"])),
            names(&["foo_tbl"])
        );
    }

    #[test]
    fn test_case_sensitive_membership() {
        let rule = BroadcastRule::new(IdentifierCasePolicy::Sensitive, ["Foo_Tbl"]);
        assert!(rule.is_all_broadcast_tables(&names(&["Foo_Tbl"])));
        assert!(!rule.is_all_broadcast_tables(&names(&["foo_tbl"])));
    }

    #[test]
    fn test_reload_swaps_wholesale() {
        let rule = rule();
        let before = rule.snapshot();
        rule.reload(["baz_tbl"]);
        // The old snapshot is unchanged; the rule answers from the new one.
        assert!(before.contains("foo_tbl"));
        assert!(!rule.is_all_broadcast_tables(&names(&["foo_tbl"])));
        assert!(rule.is_all_broadcast_tables(&names(&["baz_tbl"])));
    }
}
