//! Error types for the tanq-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when compiling or executing queries.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A clause carried a field or value the engine cannot turn into a
    /// query: an unknown field identifier, a malformed wildcard pattern, or
    /// a structurally invalid phrase.
    #[error("invalid clause value: {message}")]
    InvalidClauseValue {
        /// What was wrong with the clause.
        message: String,
    },

    /// Failed to open or create the index.
    #[error("failed to open index at {path}: {message}")]
    OpenIndex {
        /// Path to the index directory.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Query execution failed inside the engine.
    #[error("search execution failed: {0}")]
    Execute(String),

    /// Failed to write to the index.
    #[error("failed to write to index: {0}")]
    Write(String),

    /// Failed to commit changes to the index.
    #[error("failed to commit index: {0}")]
    Commit(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SearchError {
    /// Creates an `InvalidClauseValue` error.
    pub(crate) fn invalid_clause(message: impl Into<String>) -> Self {
        Self::InvalidClauseValue {
            message: message.into(),
        }
    }

    /// Creates an `OpenIndex` error from a path and Tantivy error.
    pub(crate) fn open_index(path: PathBuf, source: &tantivy::TantivyError) -> Self {
        Self::OpenIndex {
            path,
            message: source.to_string(),
        }
    }

    /// Creates an `Execute` error from a Tantivy error.
    pub(crate) fn execute(source: &tantivy::TantivyError) -> Self {
        Self::Execute(source.to_string())
    }

    /// Creates a `Write` error from a Tantivy error.
    pub(crate) fn write(source: &tantivy::TantivyError) -> Self {
        Self::Write(source.to_string())
    }

    /// Creates a `Commit` error from a Tantivy error.
    pub(crate) fn commit(source: &tantivy::TantivyError) -> Self {
        Self::Commit(source.to_string())
    }
}
