//! Content record types.

use serde::{Deserialize, Serialize};

/// One content item handed to the indexing adapter.
///
/// The generalized shape of a CMS content record: a unique identifier that
/// survives re-crawls, the item's path within the content tree, and the
/// extracted field values. Field extraction itself is the content store's
/// concern; this type only carries the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Stable unique identifier of the record.
    pub unique_id: String,
    /// Path of the record within the content tree.
    pub path: String,
    /// Extracted `(field name, value)` pairs, in extraction order.
    pub fields: Vec<(String, String)>,
}

impl ContentRecord {
    /// Creates a record with no fields.
    pub fn new(unique_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
            path: path.into(),
            fields: Vec::new(),
        }
    }

    /// Appends one field value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}
