//! Search execution facade.
//!
//! [`Search`] accepts a builder (or an already-native query), compiles where
//! needed, executes against the index, and returns an [`ExecuteResult`] with
//! the exact total hit count, elapsed time, and score-ordered documents with
//! paged access. Sorting happens here, over stored field values, because the
//! builder only records sort specs; compilation ignores them.
//!
//! The facade performs no scoring or result ranking of its own: everything
//! relevance-related is the engine's, and everything here is read-only over
//! the index.

use std::{cmp::Ordering, path::Path, time::Instant};

use tanq_core::{QueryBuilder, SortSpec};
use tantivy::{
    Index, IndexReader, TantivyDocument,
    collector::{Count, TopDocs},
    directory::MmapDirectory,
    query::Query,
    schema::{Field, Value},
};

use crate::{
    compile::{EngineQuery, QueryCompiler},
    error::SearchError,
};

/// Maximum number of documents materialized per execution.
///
/// Total hit counts are exact regardless; only document retrieval is capped.
pub const MAX_RETRIEVED_DOCS: usize = 100_000;

/// One retrieved document with its relevance score.
#[derive(Debug)]
pub struct ScoredDocument {
    /// Engine relevance score.
    pub score: f32,
    /// The stored document.
    pub doc: TantivyDocument,
}

impl ScoredDocument {
    /// Returns the first stored text value of `field`, if any.
    pub fn text(&self, field: Field) -> Option<&str> {
        self.doc.get_first(field).and_then(|value| value.as_str())
    }
}

/// The outcome of one query execution.
///
/// A stateless snapshot: it holds materialized documents and is not linked
/// back to the builder or index state it came from.
#[derive(Debug)]
pub struct ExecuteResult {
    /// Exact number of matching documents.
    total_hits: usize,
    /// Wall-clock execution time in milliseconds.
    elapsed_ms: u128,
    /// Retrieved documents, score-ordered (or sort-ordered when sorts were
    /// requested).
    documents: Vec<ScoredDocument>,
}

impl ExecuteResult {
    /// A result with no hits, produced for queries that compile to nothing.
    pub(crate) fn empty() -> Self {
        Self {
            total_hits: 0,
            elapsed_ms: 0,
            documents: Vec::new(),
        }
    }

    /// Exact number of matching documents.
    pub fn total_hits(&self) -> usize {
        self.total_hits
    }

    /// Wall-clock execution time in milliseconds.
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed_ms
    }

    /// All retrieved documents in result order.
    pub fn top_documents(&self) -> &[ScoredDocument] {
        &self.documents
    }

    /// One page of documents: `len` documents starting at `offset`.
    ///
    /// Out-of-range pages clamp to the available documents rather than
    /// failing.
    pub fn page(&self, offset: usize, len: usize) -> &[ScoredDocument] {
        let start = offset.min(self.documents.len());
        let end = offset.saturating_add(len).min(self.documents.len());
        &self.documents[start..end]
    }

    /// Whether the execution matched nothing.
    pub fn is_empty(&self) -> bool {
        self.total_hits == 0
    }
}

/// Executes compiled queries against one index.
pub struct Search {
    /// The Tantivy index.
    index: Index,
    /// Reader providing point-in-time searchers.
    reader: IndexReader,
}

impl Search {
    /// Opens an existing on-disk index for searching.
    pub fn open(path: &Path) -> Result<Self, SearchError> {
        if !path.exists() {
            return Err(SearchError::OpenIndex {
                path: path.to_path_buf(),
                message: "index directory does not exist".to_string(),
            });
        }

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            SearchError::open_index(path.to_path_buf(), &err)
        })?;

        let index =
            Index::open(dir).map_err(|e| SearchError::open_index(path.to_path_buf(), &e))?;

        Self::from_index(index)
    }

    /// Wraps an already-open index (e.g. an in-RAM index shared with a
    /// writer).
    pub fn from_index(index: Index) -> Result<Self, SearchError> {
        let reader = index.reader().map_err(|e| SearchError::execute(&e))?;
        Ok(Self { index, reader })
    }

    /// The underlying index handle.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Picks up commits made to the index since the reader was created.
    pub fn reload(&self) -> Result<(), SearchError> {
        self.reader.reload().map_err(|e| SearchError::execute(&e))
    }

    /// Compiles and executes a builder, honoring its sort specs.
    ///
    /// A builder that compiles to nothing (empty, or only empty groups)
    /// executes to an empty result rather than an engine error.
    pub fn execute(
        &self,
        builder: &QueryBuilder<EngineQuery>,
    ) -> Result<ExecuteResult, SearchError> {
        let mut compiler = QueryCompiler::new(self.index.schema());
        match builder.accept(&mut compiler)? {
            Some(query) => self.run(&*query, builder.sorts()),
            None => Ok(ExecuteResult::empty()),
        }
    }

    /// Executes an already-native engine query.
    ///
    /// Interop parity with builder-injected raw clauses: anything the engine
    /// can execute goes through the same result path.
    pub fn execute_query(
        &self,
        query: &dyn Query,
        sorts: &[SortSpec],
    ) -> Result<ExecuteResult, SearchError> {
        self.run(query, sorts)
    }

    /// Runs one query and materializes the result set.
    fn run(&self, query: &dyn Query, sorts: &[SortSpec]) -> Result<ExecuteResult, SearchError> {
        let started = Instant::now();
        let searcher = self.reader.searcher();

        let (top_docs, total_hits) = searcher
            .search(query, &(TopDocs::with_limit(MAX_RETRIEVED_DOCS), Count))
            .map_err(|e| SearchError::execute(&e))?;

        let mut documents = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(address)
                .map_err(|e| SearchError::execute(&e))?;
            documents.push(ScoredDocument { score, doc });
        }

        if !sorts.is_empty() {
            self.sort_documents(&mut documents, sorts)?;
        }

        Ok(ExecuteResult {
            total_hits,
            elapsed_ms: started.elapsed().as_millis(),
            documents,
        })
    }

    /// Sorts materialized documents by stored field values.
    ///
    /// Multi-key ordinal comparison, applying keys in the order they were
    /// added; documents missing a sort field compare as empty. The sort is
    /// stable, so ties keep their score order.
    fn sort_documents(
        &self,
        documents: &mut [ScoredDocument],
        sorts: &[SortSpec],
    ) -> Result<(), SearchError> {
        let schema = self.index.schema();
        let mut keys = Vec::with_capacity(sorts.len());
        for spec in sorts {
            let field = schema.get_field(&spec.field).map_err(|_| {
                SearchError::invalid_clause(format!("unknown sort field: {}", spec.field))
            })?;
            keys.push((field, spec.descending));
        }

        documents.sort_by(|left, right| {
            for (field, descending) in &keys {
                let ordering = left
                    .text(*field)
                    .unwrap_or("")
                    .cmp(right.text(*field).unwrap_or(""));
                let ordering = if *descending {
                    ordering.reverse()
                } else {
                    ordering
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });

        Ok(())
    }
}
