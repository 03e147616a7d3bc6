//! Persisted rule record.

use serde::{Deserialize, Serialize};

/// One row of the `immutable_tag_rule` table.
///
/// `tag_filter` is opaque to the store and stored verbatim. `disabled =
/// false` means the rule is enforced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmutableRule {
    /// Store-assigned surrogate key (0 until created).
    pub id: i64,
    /// Owning project; not validated here.
    pub project_id: i64,
    /// Encoded tag-matching expression.
    pub tag_filter: String,
    /// Whether the rule is suspended.
    pub disabled: bool,
}

impl ImmutableRule {
    /// A not-yet-persisted rule for `project_id`.
    pub fn new(project_id: i64, tag_filter: impl Into<String>) -> Self {
        Self {
            id: 0,
            project_id,
            tag_filter: tag_filter.into(),
            disabled: false,
        }
    }
}
