//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`TagRuleSettings::default()`]
//! 2. If `~/.tagrule/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::TagRuleSettings;

/// Root directory for tagrule state (`~/.tagrule`).
pub fn tagrule_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".tagrule")
}

/// Resolve the path to the settings file (`~/.tagrule/settings.json`).
pub fn settings_path() -> PathBuf {
    tagrule_dir().join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<TagRuleSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. Invalid JSON or values that
/// fail [`TagRuleSettings::validate`] are errors.
pub fn load_settings_from_path(path: &Path) -> Result<TagRuleSettings> {
    let mut settings = load_file_layer(path)?;
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

fn load_file_layer(path: &Path) -> Result<TagRuleSettings> {
    let defaults = serde_json::to_value(TagRuleSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `TAGRULE_*` environment variable overrides.
pub fn apply_env_overrides(settings: &mut TagRuleSettings) {
    apply_overrides_from(settings, |name| std::env::var(name).ok());
}

/// Apply overrides read through `lookup`.
///
/// Invalid values are ignored with a warning, leaving the file/default value.
pub fn apply_overrides_from<F>(settings: &mut TagRuleSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(v) = read("TAGRULE_DB_PATH") {
        settings.store.database_path = v;
    }
    if let Some(v) = read("TAGRULE_POOL_SIZE") {
        match parse_u32_range(&v, 1, 256) {
            Some(n) => settings.store.pool_size = n,
            None => warn_invalid("TAGRULE_POOL_SIZE", &v),
        }
    }
    if let Some(v) = read("TAGRULE_BUSY_TIMEOUT_MS") {
        match parse_u32_range(&v, 0, 600_000) {
            Some(n) => settings.store.busy_timeout_ms = n,
            None => warn_invalid("TAGRULE_BUSY_TIMEOUT_MS", &v),
        }
    }
    if let Some(v) = read("TAGRULE_LOG_LEVEL") {
        settings.logging.level = v.to_lowercase();
    }
    if let Some(v) = read("TAGRULE_LOG_JSON") {
        match parse_bool(&v) {
            Some(b) => settings.logging.json = b,
            None => warn_invalid("TAGRULE_LOG_JSON", &v),
        }
    }
}

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u32` within an inclusive range.
pub fn parse_u32_range(val: &str, min: u32, max: u32) -> Option<u32> {
    let n: u32 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

fn warn_invalid(key: &str, value: &str) {
    tracing::warn!(key, value, "invalid env var, ignoring");
}
