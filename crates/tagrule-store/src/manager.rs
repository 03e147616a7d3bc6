//! Metadata-level rule management.
//!
//! Wraps a [`RuleStore`] so callers work with [`RuleMetadata`]. Key rules:
//!
//! - **Encoding**: the full metadata is serialized into the tag filter on
//!   create and update.
//! - **Enable vs. disable**: [`RuleManager::enable`] takes the positive flag
//!   and stores its inverse.
//! - **Row authority**: on read, `id`, `project_id` and `disabled` come from
//!   the stored row.

use tracing::debug;

use crate::errors::Result;
use crate::metadata::RuleMetadata;
use crate::model::ImmutableRule;
use crate::store::RuleStore;

/// Rule manager over any [`RuleStore`].
pub struct RuleManager<S> {
    store: S,
}

impl<S: RuleStore> RuleManager<S> {
    /// Create a manager backed by `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a rule from metadata. The new rule is always enabled.
    pub fn create(&self, meta: &RuleMetadata) -> Result<i64> {
        let mut rule = ImmutableRule {
            id: 0,
            project_id: meta.project_id,
            tag_filter: meta.to_tag_filter()?,
            disabled: meta.disabled,
        };
        let id = self.store.create(&mut rule)?;
        debug!(id, project_id = meta.project_id, "rule metadata stored");
        Ok(id)
    }

    /// Re-encode `meta` into the tag filter of rule `meta.id`.
    pub fn update(&self, project_id: i64, meta: &RuleMetadata) -> Result<i64> {
        let mut rule = ImmutableRule {
            id: meta.id,
            project_id,
            tag_filter: meta.to_tag_filter()?,
            disabled: meta.disabled,
        };
        self.store.update(project_id, &mut rule)
    }

    /// Enable (`true`) or disable (`false`) rule `id`.
    pub fn enable(&self, id: i64, enabled: bool) -> Result<i64> {
        self.store.toggle(id, !enabled)
    }

    /// Fetch and decode one rule.
    pub fn get(&self, id: i64) -> Result<RuleMetadata> {
        RuleMetadata::from_rule(&self.store.get(id)?)
    }

    /// Decode all rules of a project.
    pub fn list_by_project(&self, project_id: i64) -> Result<Vec<RuleMetadata>> {
        self.store
            .list_by_project(project_id)?
            .iter()
            .map(RuleMetadata::from_rule)
            .collect()
    }

    /// Decode the enabled rules of a project.
    pub fn list_enabled_by_project(&self, project_id: i64) -> Result<Vec<RuleMetadata>> {
        self.store
            .list_enabled_by_project(project_id)?
            .iter()
            .map(RuleMetadata::from_rule)
            .collect()
    }

    /// Delete rule `id`, returning rows removed.
    pub fn delete(&self, id: i64) -> Result<usize> {
        self.store.delete(id)
    }
}

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::errors::RuleError;
    use crate::metadata::Selector;
    use crate::store::SqliteRuleStore;

    fn manager() -> RuleManager<SqliteRuleStore> {
        RuleManager::new(SqliteRuleStore::in_memory().unwrap())
    }

    fn meta(project_id: i64, pattern: &str) -> RuleMetadata {
        RuleMetadata {
            project_id,
            action: "immutable".to_string(),
            template: "immutable_template".to_string(),
            tag_selectors: vec![Selector {
                kind: "doublestar".to_string(),
                decoration: "matches".to_string(),
                pattern: pattern.to_string(),
                extras: String::new(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn create_and_get() {
        let mgr = manager();
        let id = mgr
            .create(&RuleMetadata {
                disabled: true,
                ..meta(1, "release-*")
            })
            .unwrap();
        let got = mgr.get(id).unwrap();
        assert_eq!(got.id, id);
        assert_eq!(got.project_id, 1);
        assert!(!got.disabled);
        assert_eq!(got.tag_selectors[0].pattern, "release-*");
    }

    #[test]
    fn identical_metadata_conflicts() {
        let mgr = manager();
        mgr.create(&meta(1, "v*")).unwrap();
        assert_matches!(mgr.create(&meta(1, "v*")), Err(RuleError::Conflict(_)));
    }

    #[test]
    fn update_rewrites_selectors() {
        let mgr = manager();
        let id = mgr.create(&meta(1, "old")).unwrap();
        let mut changed = meta(1, "new");
        changed.id = id;
        assert_eq!(mgr.update(1, &changed).unwrap(), id);
        assert_eq!(mgr.get(id).unwrap().tag_selectors[0].pattern, "new");
    }

    #[test]
    fn update_missing_is_not_found() {
        let mgr = manager();
        let mut missing = meta(1, "x");
        missing.id = 50;
        assert!(mgr.update(1, &missing).unwrap_err().is_not_found());
    }

    #[test]
    fn enable_inverts_into_disabled() {
        let mgr = manager();
        let id = mgr.create(&meta(2, "a")).unwrap();
        mgr.enable(id, false).unwrap();
        assert!(mgr.get(id).unwrap().disabled);
        assert!(mgr.list_enabled_by_project(2).unwrap().is_empty());

        mgr.enable(id, true).unwrap();
        assert_eq!(mgr.list_enabled_by_project(2).unwrap().len(), 1);
    }

    #[test]
    fn list_by_project_decodes_all() {
        let mgr = manager();
        mgr.create(&meta(4, "a")).unwrap();
        mgr.create(&meta(4, "b")).unwrap();
        mgr.create(&meta(5, "c")).unwrap();
        let mut patterns: Vec<String> = mgr
            .list_by_project(4)
            .unwrap()
            .into_iter()
            .map(|m| m.tag_selectors[0].pattern.clone())
            .collect();
        patterns.sort();
        assert_eq!(patterns, vec!["a", "b"]);
    }

    #[test]
    fn undecodable_filter_is_error() {
        let mgr = manager();
        let mut raw = ImmutableRule::new(6, "not-json");
        let id = mgr.store().create(&mut raw).unwrap();
        assert_matches!(mgr.get(id), Err(RuleError::Serde(_)));
        assert_matches!(mgr.list_by_project(6), Err(RuleError::Serde(_)));
    }

    #[test]
    fn delete_reports_rows() {
        let mgr = manager();
        let id = mgr.create(&meta(1, "a")).unwrap();
        assert_eq!(mgr.delete(id).unwrap(), 1);
        assert_eq!(mgr.delete(id).unwrap(), 0);
    }
}
