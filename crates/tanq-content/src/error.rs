//! Error types for the tanq-content crate.

use tanq_index::SearchError;
use thiserror::Error;

/// Errors that can occur while indexing content records.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The index schema declares no `unique_id` field, so records cannot be
    /// addressed for update or deletion.
    #[error("index schema has no unique_id field")]
    MissingUniqueIdField,

    /// The underlying index rejected the operation.
    #[error(transparent)]
    Index(#[from] SearchError),
}
