//! Structured rule metadata carried inside the opaque tag filter column.
//!
//! The store never interprets these fields; they only round-trip through
//! JSON so callers can work with typed selectors instead of raw strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::model::ImmutableRule;

/// One selector clause (e.g. `doublestar` / `matches` / `release-**`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    /// Selector algorithm.
    pub kind: String,
    /// How the pattern is applied (`matches`, `excludes`, ...).
    pub decoration: String,
    /// Pattern evaluated by the selector.
    pub pattern: String,
    /// Free-form extra arguments.
    #[serde(default)]
    pub extras: String,
}

/// Typed view of an immutable tag rule.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleMetadata {
    /// Rule ID (taken from the row on read).
    pub id: i64,
    /// Owning project.
    pub project_id: i64,
    /// Whether the rule is suspended (taken from the row on read).
    pub disabled: bool,
    /// Evaluation priority.
    pub priority: i32,
    /// Action applied to matching tags.
    pub action: String,
    /// Rule template name.
    pub template: String,
    /// Tag selectors.
    pub tag_selectors: Vec<Selector>,
    /// Scope selectors keyed by scope (e.g. `repository`).
    pub scope_selectors: BTreeMap<String, Vec<Selector>>,
}

impl RuleMetadata {
    /// Encode the whole metadata as a tag filter string.
    pub fn to_tag_filter(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a stored rule. `id`, `project_id` and `disabled` come from the
    /// row, not from the encoded filter.
    pub fn from_rule(rule: &ImmutableRule) -> Result<Self> {
        let mut meta: Self = serde_json::from_str(&rule.tag_filter)?;
        meta.id = rule.id;
        meta.project_id = rule.project_id;
        meta.disabled = rule.disabled;
        Ok(meta)
    }
}
