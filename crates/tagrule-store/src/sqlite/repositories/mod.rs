//! Repository implementations for `SQLite` database operations.

pub mod immutable_rule;

pub use immutable_rule::ImmutableRuleRepo;
