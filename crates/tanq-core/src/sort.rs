//! Sort specifications.

use serde::{Deserialize, Serialize};

/// One sort key: a field identifier plus direction.
///
/// Collected on the builder in priority order and consumed by the execution
/// collaborator; compilation ignores sorts entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field identifier to sort on.
    pub field: String,
    /// Whether to sort descending instead of ascending.
    pub descending: bool,
}

impl SortSpec {
    /// Creates an ascending sort on `field`.
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    /// Creates a descending sort on `field`.
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}
