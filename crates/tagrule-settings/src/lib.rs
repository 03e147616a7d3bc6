//! # tagrule-settings
//!
//! Configuration for the immutable tag rule store.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`TagRuleSettings::default()`]
//! 2. **User file**: `~/.tagrule/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `TAGRULE_*` overrides (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use tagrule_settings::get_settings;
//!
//! let settings = get_settings();
//! println!("rule database: {}", settings.store.database_path);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::sync::OnceLock;

/// Global settings singleton.
static SETTINGS: OnceLock<TagRuleSettings> = OnceLock::new();

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.tagrule/settings.json` with env var
/// overrides. If loading fails, returns compiled defaults.
pub fn get_settings() -> &'static TagRuleSettings {
    SETTINGS.get_or_init(|| load_settings().unwrap_or_default())
}

/// Initialize the global settings with a specific value.
///
/// Returns the settings back if the global was already initialized.
#[allow(clippy::result_large_err)]
pub fn init_settings(settings: TagRuleSettings) -> std::result::Result<(), TagRuleSettings> {
    SETTINGS.set(settings)
}
