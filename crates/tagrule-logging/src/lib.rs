//! # tagrule-logging
//!
//! Structured logging with `tracing`.
//!
//! [`init_logging`] installs a global subscriber built from
//! [`LoggingSettings`]: an `EnvFilter` (where `RUST_LOG` takes precedence
//! over the configured level) feeding either JSON lines or human-readable
//! output on stdout.

#![deny(unsafe_code)]

pub mod types;

pub use types::LogLevel;

use tagrule_settings::LoggingSettings;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Errors from logging setup.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber was already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Build the filter directive string from settings.
///
/// Produces `"<level>,<module>=<level>,..."` with every level normalized
/// through [`LogLevel::from_str_lossy`].
pub fn filter_directives(settings: &LoggingSettings) -> String {
    let mut directives = LogLevel::from_str_lossy(&settings.level).to_string();
    for (module, level) in &settings.modules {
        directives.push(',');
        directives.push_str(module);
        directives.push('=');
        directives.push_str(&LogLevel::from_str_lossy(level).to_string());
    }
    directives
}

/// Resolve the effective filter: `RUST_LOG` when set and valid, else settings.
pub fn build_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(settings)))
}

/// Install the global tracing subscriber. Call once at startup.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), LoggingError> {
    let filter = build_filter(settings);

    let result = if settings.json {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_span_list(true)
            .with_filter(filter);
        tracing_subscriber::registry().with(layer).try_init()
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_filter(filter);
        tracing_subscriber::registry().with(layer).try_init()
    };

    result.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;
    tracing::debug!(directives = %filter_directives(settings), json = settings.json, "logging initialized");
    Ok(())
}
