//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so partial JSON
//! files are accepted; missing fields take their compiled default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Root settings type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TagRuleSettings {
    /// Rule database settings.
    pub store: StoreSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl TagRuleSettings {
    /// Reject values the store cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.store.pool_size == 0 {
            return Err(SettingsError::InvalidValue(
                "store.poolSize must be at least 1".to_string(),
            ));
        }
        if self.store.database_path.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "store.databasePath must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// `SQLite` rule database settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    /// Path of the database file.
    pub database_path: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// `PRAGMA busy_timeout` in milliseconds.
    pub busy_timeout_ms: u32,
    /// `PRAGMA cache_size` in KiB.
    pub cache_size_kib: i64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            database_path: crate::loader::tagrule_dir()
                .join("database")
                .join("rules.db")
                .to_string_lossy()
                .into_owned(),
            pool_size: 8,
            busy_timeout_ms: 30_000,
            cache_size_kib: 8192,
        }
    }
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default level filter (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Per-module level overrides, e.g. `{"tagrule_store": "debug"}`.
    pub modules: BTreeMap<String, String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            modules: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(TagRuleSettings::default()).unwrap();
        assert!(json["store"]["databasePath"].is_string());
        assert_eq!(json["store"]["poolSize"], 8);
        assert_eq!(json["store"]["busyTimeoutMs"], 30_000);
        assert_eq!(json["logging"]["level"], "info");
    }

    #[test]
    fn partial_json_uses_defaults() {
        let settings: TagRuleSettings =
            serde_json::from_str(r#"{"store": {"poolSize": 2}}"#).unwrap();
        assert_eq!(settings.store.pool_size, 2);
        assert_eq!(settings.store.busy_timeout_ms, 30_000);
        assert_eq!(settings.logging, LoggingSettings::default());
    }

    #[test]
    fn validate_rejects_zero_pool() {
        let mut settings = TagRuleSettings::default();
        settings.store.pool_size = 0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidValue(_))
        ));
    }

    #[test]
    fn validate_rejects_blank_path() {
        let mut settings = TagRuleSettings::default();
        settings.store.database_path = "  ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(TagRuleSettings::default().validate().is_ok());
    }
}
