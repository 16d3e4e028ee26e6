//! Thin index writer passthrough.

use std::{fs, path::Path};

use tantivy::{
    Index, IndexWriter as TantivyIndexWriter, TantivyDocument, Term, directory::MmapDirectory,
    schema::Schema,
};

use crate::error::SearchError;

/// Default heap size for the index writer (50 MB).
const DEFAULT_HEAP_SIZE: usize = 50_000_000;

/// Writes caller-built documents to a Tantivy index.
///
/// A passthrough over the engine writer: the caller supplies the schema and
/// the documents; nothing here inspects or validates field content.
pub struct IndexWriter {
    /// The Tantivy index.
    index: Index,
    /// The underlying Tantivy writer.
    writer: TantivyIndexWriter,
}

impl IndexWriter {
    /// Opens or creates an index at the given path with the given schema.
    pub fn open(path: &Path, schema: Schema) -> Result<Self, SearchError> {
        fs::create_dir_all(path)?;

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            SearchError::open_index(path.to_path_buf(), &err)
        })?;

        let index = Index::open_or_create(dir, schema)
            .map_err(|e| SearchError::open_index(path.to_path_buf(), &e))?;

        Self::from_index(index)
    }

    /// Creates a fresh in-RAM index with the given schema.
    pub fn create_in_ram(schema: Schema) -> Result<Self, SearchError> {
        Self::from_index(Index::create_in_ram(schema))
    }

    /// Wraps an already-open index.
    fn from_index(index: Index) -> Result<Self, SearchError> {
        let writer = index
            .writer(DEFAULT_HEAP_SIZE)
            .map_err(|e| SearchError::write(&e))?;

        Ok(Self { index, writer })
    }

    /// Stages a document for writing; not visible until [`commit`](Self::commit).
    pub fn add_document(&mut self, document: TantivyDocument) -> Result<(), SearchError> {
        self.writer
            .add_document(document)
            .map_err(|e| SearchError::write(&e))?;
        Ok(())
    }

    /// Stages deletion of every document matching `term`.
    ///
    /// Deleting a term with no matches is a no-op at the engine level.
    pub fn delete_term(&mut self, term: Term) {
        self.writer.delete_term(term);
    }

    /// Stages deletion of all documents.
    pub fn delete_all(&mut self) -> Result<(), SearchError> {
        self.writer
            .delete_all_documents()
            .map_err(|e| SearchError::write(&e))?;
        Ok(())
    }

    /// Commits all staged changes, making them visible to readers.
    pub fn commit(&mut self) -> Result<(), SearchError> {
        self.writer.commit().map_err(|e| SearchError::commit(&e))?;
        Ok(())
    }

    /// Rolls back any uncommitted changes.
    pub fn rollback(&mut self) -> Result<(), SearchError> {
        self.writer
            .rollback()
            .map_err(|e| SearchError::commit(&e))?;
        Ok(())
    }

    /// Returns the number of committed documents in the index.
    pub fn num_docs(&self) -> Result<u64, SearchError> {
        let reader = self
            .index
            .reader()
            .map_err(|e| SearchError::write(&e))?;
        Ok(reader.searcher().num_docs())
    }

    /// The underlying index handle, for sharing with a [`Search`](crate::Search).
    pub fn index(&self) -> &Index {
        &self.index
    }
}
