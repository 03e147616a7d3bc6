//! # tagrule-store
//!
//! Persistence for per-project immutable tag rules.
//!
//! - [`store::RuleStore`]: the seven rule operations, backed by
//!   [`store::SqliteRuleStore`] over a pooled `SQLite` database.
//! - [`errors::RuleError`]: the error taxonomy. Duplicate `(project, filter)`
//!   pairs surface as `Conflict`, missing rules on update/toggle/get as
//!   `NotFound`.
//! - [`manager::RuleManager`]: typed [`metadata::RuleMetadata`] view encoded
//!   into the tag filter.

#![deny(unsafe_code)]

pub mod errors;
pub mod manager;
pub mod metadata;
pub mod model;
pub mod sqlite;
pub mod store;

pub use errors::{Result, RuleError};
pub use manager::RuleManager;
pub use metadata::{RuleMetadata, Selector};
pub use model::ImmutableRule;
pub use sqlite::repositories::ImmutableRuleRepo;
pub use store::{RuleStore, SqliteRuleStore};
