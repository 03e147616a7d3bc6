//! Immutable rule repository: CRUD for the `immutable_tag_rule` table.
//!
//! Stateless: every method takes `&Connection` and performs a single
//! statement. Transactions, isolation and ordering between concurrent
//! callers are left to `SQLite`.

use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, warn};

use crate::errors::{Result, RuleError, is_duplicate_record};
use crate::model::ImmutableRule;

/// Immutable rule repository. Stateless; every method takes `&Connection`.
pub struct ImmutableRuleRepo;

impl ImmutableRuleRepo {
    /// Insert a new rule and return its store-assigned ID.
    ///
    /// `rule.disabled` is forced to `false` and `rule.id` is set to the new
    /// ID. A duplicate `(project_id, tag_filter)` yields [`RuleError::Conflict`].
    pub fn create(conn: &Connection, rule: &mut ImmutableRule) -> Result<i64> {
        rule.disabled = false;

        match conn.execute(
            "INSERT INTO immutable_tag_rule (project_id, tag_filter, disabled)
             VALUES (?1, ?2, ?3)",
            params![rule.project_id, rule.tag_filter, rule.disabled],
        ) {
            Ok(_) => {
                rule.id = conn.last_insert_rowid();
                debug!(id = rule.id, project_id = rule.project_id, "immutable rule created");
                Ok(rule.id)
            }
            Err(e) if is_duplicate_record(&e) => {
                warn!(project_id = rule.project_id, error = %e, "duplicate immutable rule");
                Err(RuleError::Conflict(e))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the tag filter of rule `rule.id`.
    ///
    /// `rule.project_id` is bound to `project_id` first; only the
    /// `tag_filter` column is written.
    pub fn update(conn: &Connection, project_id: i64, rule: &mut ImmutableRule) -> Result<i64> {
        rule.project_id = project_id;

        let changed = conn.execute(
            "UPDATE immutable_tag_rule SET tag_filter = ?1 WHERE id = ?2",
            params![rule.tag_filter, rule.id],
        )?;
        if changed == 0 {
            return Err(RuleError::not_found(rule.id));
        }
        Ok(rule.id)
    }

    /// Set the `disabled` flag of rule `id`.
    pub fn toggle(conn: &Connection, id: i64, disabled: bool) -> Result<i64> {
        let changed = conn.execute(
            "UPDATE immutable_tag_rule SET disabled = ?1 WHERE id = ?2",
            params![disabled, id],
        )?;
        if changed == 0 {
            return Err(RuleError::not_found(id));
        }
        Ok(id)
    }

    /// Get a rule by ID.
    pub fn get(conn: &Connection, id: i64) -> Result<ImmutableRule> {
        conn.query_row(
            "SELECT id, project_id, tag_filter, disabled
             FROM immutable_tag_rule WHERE id = ?1",
            params![id],
            Self::map_row,
        )
        .optional()?
        .ok_or_else(|| RuleError::not_found(id))
    }

    /// All rules of a project, in store order.
    pub fn list_by_project(conn: &Connection, project_id: i64) -> Result<Vec<ImmutableRule>> {
        Self::query_project(
            conn,
            "SELECT id, project_id, tag_filter, disabled
             FROM immutable_tag_rule WHERE project_id = ?1",
            project_id,
        )
        .map_err(|source| RuleError::Query {
            operation: "get immutable tag rule",
            project_id,
            source,
        })
    }

    /// Enabled (`disabled = 0`) rules of a project, in store order.
    pub fn list_enabled_by_project(
        conn: &Connection,
        project_id: i64,
    ) -> Result<Vec<ImmutableRule>> {
        Self::query_project(
            conn,
            "SELECT id, project_id, tag_filter, disabled
             FROM immutable_tag_rule WHERE project_id = ?1 AND disabled = 0",
            project_id,
        )
        .map_err(|source| RuleError::Query {
            operation: "get enabled immutable tag rule",
            project_id,
            source,
        })
    }

    /// Delete rule `id`. Returns the number of rows removed (0 or 1).
    pub fn delete(conn: &Connection, id: i64) -> Result<usize> {
        let changed = conn.execute("DELETE FROM immutable_tag_rule WHERE id = ?1", params![id])?;
        Ok(changed)
    }

    fn query_project(
        conn: &Connection,
        sql: &str,
        project_id: i64,
    ) -> rusqlite::Result<Vec<ImmutableRule>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params![project_id], Self::map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Map a rusqlite row to [`ImmutableRule`].
    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ImmutableRule> {
        Ok(ImmutableRule {
            id: row.get(0)?,
            project_id: row.get(1)?,
            tag_filter: row.get(2)?,
            disabled: row.get(3)?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
