//! Error types for the rule store.
//!
//! [`RuleError`] is returned by every repository, store and manager
//! operation. `Conflict` and `NotFound` are the two classified outcomes
//! callers branch on; everything else carries the underlying failure as-is.

use thiserror::Error;

/// Errors that can occur during rule store operations.
#[derive(Debug, Error)]
pub enum RuleError {
    /// Insert rejected by a uniqueness constraint.
    #[error("conflict: {0}")]
    Conflict(#[source] rusqlite::Error),

    /// The targeted rule does not exist.
    #[error("{message}")]
    NotFound {
        /// Identifier that was looked up.
        id: i64,
        /// Human-readable message naming the identifier.
        message: String,
    },

    /// A per-project listing query failed.
    #[error("failed to {operation} by projectID {project_id}, error: {source}")]
    Query {
        /// Which listing was running.
        operation: &'static str,
        /// Project the listing was scoped to.
        project_id: i64,
        /// Underlying query failure.
        #[source]
        source: rusqlite::Error,
    },

    /// `SQLite` database error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Schema migration failed.
    #[error("migration error: {message}")]
    Migration {
        /// Describes which migration failed and why.
        message: String,
    },

    /// Rule metadata could not be encoded into or decoded from a tag filter.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Filesystem error while preparing the database location.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for rule store results.
pub type Result<T> = std::result::Result<T, RuleError>;

impl RuleError {
    /// Not-found error for a rule identifier.
    pub fn not_found(id: i64) -> Self {
        Self::NotFound {
            id,
            message: format!("the immutable rule {id} is not found."),
        }
    }

    /// Whether this is a [`RuleError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this is a [`RuleError::Conflict`].
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::Conflict(_) => "conflict",
            Self::NotFound { .. } => "not_found",
            Self::Query { .. } => "query",
            Self::Sqlite(_) => "sqlite",
            Self::Pool(_) => "pool",
            Self::Migration { .. } => "migration",
            Self::Serde(_) => "serde",
            Self::Io(_) => "io",
        }
    }
}

/// Whether a `SQLite` failure is a unique or primary-key constraint violation.
pub(crate) fn is_duplicate_record(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, _) => {
            code.code == rusqlite::ErrorCode::ConstraintViolation
                && matches!(
                    code.extended_code,
                    rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                        | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                )
        }
        _ => false,
    }
}
