//! The rule store interface and its pooled `SQLite` implementation.
//!
//! [`RuleStore`] is what policy evaluation and API collaborators depend on.
//! [`SqliteRuleStore`] checks a connection out of the pool for each call and
//! delegates to [`ImmutableRuleRepo`]; it keeps no other state.

use std::path::Path;

use tagrule_settings::StoreSettings;
use tracing::{info, instrument};

use crate::errors::Result;
use crate::model::ImmutableRule;
use crate::sqlite::{
    ConnectionConfig, ConnectionPool, PooledConnection, new_file, new_in_memory, run_migrations,
};
use crate::sqlite::repositories::ImmutableRuleRepo;

/// Access to persisted immutable tag rules.
pub trait RuleStore: Send + Sync {
    /// Persist a new rule (always enabled) and return its ID.
    fn create(&self, rule: &mut ImmutableRule) -> Result<i64>;
    /// Replace the tag filter of `rule.id`, binding `rule.project_id` to `project_id`.
    fn update(&self, project_id: i64, rule: &mut ImmutableRule) -> Result<i64>;
    /// Set the disabled flag of rule `id`.
    fn toggle(&self, id: i64, disabled: bool) -> Result<i64>;
    /// Fetch one rule.
    fn get(&self, id: i64) -> Result<ImmutableRule>;
    /// All rules of a project.
    fn list_by_project(&self, project_id: i64) -> Result<Vec<ImmutableRule>>;
    /// Enabled rules of a project.
    fn list_enabled_by_project(&self, project_id: i64) -> Result<Vec<ImmutableRule>>;
    /// Delete rule `id`, returning the number of rows removed.
    fn delete(&self, id: i64) -> Result<usize>;
}

/// Pooled `SQLite` [`RuleStore`].
#[derive(Clone)]
pub struct SqliteRuleStore {
    pool: ConnectionPool,
}

impl SqliteRuleStore {
    /// Wrap an existing pool. The schema must already be migrated.
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database described by `settings` and
    /// bring its schema up to date.
    pub fn open(settings: &StoreSettings) -> Result<Self> {
        let path = Path::new(&settings.database_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let pool = new_file(&settings.database_path, &ConnectionConfig::from(settings))?;
        let applied = run_migrations(&*pool.get()?)?;
        info!(path = %path.display(), applied, "rule store opened");
        Ok(Self { pool })
    }

    /// Open a migrated in-memory store.
    pub fn in_memory() -> Result<Self> {
        let pool = new_in_memory(&ConnectionConfig::default())?;
        let _ = run_migrations(&*pool.get()?)?;
        Ok(Self { pool })
    }

    /// The underlying pool.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn conn(&self) -> Result<PooledConnection> {
        Ok(self.pool.get()?)
    }
}

impl RuleStore for SqliteRuleStore {
    #[instrument(skip(self, rule), fields(project_id = rule.project_id))]
    fn create(&self, rule: &mut ImmutableRule) -> Result<i64> {
        let conn = self.conn()?;
        ImmutableRuleRepo::create(&conn, rule)
    }

    #[instrument(skip(self, rule), fields(rule_id = rule.id))]
    fn update(&self, project_id: i64, rule: &mut ImmutableRule) -> Result<i64> {
        let conn = self.conn()?;
        ImmutableRuleRepo::update(&conn, project_id, rule)
    }

    #[instrument(skip(self))]
    fn toggle(&self, id: i64, disabled: bool) -> Result<i64> {
        let conn = self.conn()?;
        ImmutableRuleRepo::toggle(&conn, id, disabled)
    }

    #[instrument(skip(self))]
    fn get(&self, id: i64) -> Result<ImmutableRule> {
        let conn = self.conn()?;
        ImmutableRuleRepo::get(&conn, id)
    }

    #[instrument(skip(self))]
    fn list_by_project(&self, project_id: i64) -> Result<Vec<ImmutableRule>> {
        let conn = self.conn()?;
        ImmutableRuleRepo::list_by_project(&conn, project_id)
    }

    #[instrument(skip(self))]
    fn list_enabled_by_project(&self, project_id: i64) -> Result<Vec<ImmutableRule>> {
        let conn = self.conn()?;
        ImmutableRuleRepo::list_enabled_by_project(&conn, project_id)
    }

    #[instrument(skip(self))]
    fn delete(&self, id: i64) -> Result<usize> {
        let conn = self.conn()?;
        ImmutableRuleRepo::delete(&conn, id)
    }
}
