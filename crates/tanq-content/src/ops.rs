//! Index operations for content records.

use tanq_index::IndexWriter;
use tantivy::{
    TantivyDocument, Term,
    schema::{Field, Schema},
};
use tracing::warn;

use crate::{error::ContentError, record::ContentRecord};

/// Schema field holding the record's stable unique identifier.
///
/// Must be declared raw-tokenized (a Tantivy `STRING` field) so deletion by
/// exact term works.
pub const UNIQUE_ID_FIELD: &str = "unique_id";

/// Schema field holding the record's content-tree path, set automatically
/// when the schema declares it.
pub const PATH_FIELD: &str = "path";

/// Stages content records into a search index.
///
/// Holds the indexing policy (root-path scope); the index itself comes in as
/// an [`IndexWriter`] per call, and commits stay with the caller so one
/// crawl batch commits once.
#[derive(Debug, Clone)]
pub struct IndexOperations {
    /// Lowercased root paths limiting which records are indexed. Empty means
    /// everything is in scope.
    root_paths: Vec<String>,
}

impl IndexOperations {
    /// Creates operations scoped to the given root paths.
    ///
    /// A record is in scope when its path contains any root,
    /// case-insensitively. An empty list disables scoping.
    pub fn new(root_paths: Vec<String>) -> Self {
        Self {
            root_paths: root_paths
                .into_iter()
                .map(|root| root.to_lowercase())
                .collect(),
        }
    }

    /// Creates operations with no root-path scoping.
    pub fn unscoped() -> Self {
        Self::new(Vec::new())
    }

    /// Updates one record in the index: deletes whatever was previously
    /// indexed under its unique id, then stages the fresh document.
    ///
    /// Returns `Ok(false)` without staging anything when the record is
    /// outside the configured roots or yields nothing indexable; the caller
    /// skips it without error.
    pub fn update(
        &self,
        record: &ContentRecord,
        writer: &mut IndexWriter,
    ) -> Result<bool, ContentError> {
        let schema = writer.index().schema();
        let unique_id_field = unique_id_field(&schema)?;

        let Some(document) = self.admit(record, &schema) else {
            return Ok(false);
        };

        writer.delete_term(Term::from_field_text(unique_id_field, &record.unique_id));
        writer.add_document(document)?;
        Ok(true)
    }

    /// Stages one record as a new document, without deleting prior versions.
    ///
    /// Same scoping and skip semantics as [`update`](Self::update).
    pub fn add(
        &self,
        record: &ContentRecord,
        writer: &mut IndexWriter,
    ) -> Result<bool, ContentError> {
        let schema = writer.index().schema();
        unique_id_field(&schema)?;

        let Some(document) = self.admit(record, &schema) else {
            return Ok(false);
        };

        writer.add_document(document)?;
        Ok(true)
    }

    /// Stages deletion of a previously indexed record by unique id.
    ///
    /// Deleting an id that was never indexed is a no-op at the engine level.
    pub fn delete(&self, unique_id: &str, writer: &mut IndexWriter) -> Result<(), ContentError> {
        let schema = writer.index().schema();
        let field = unique_id_field(&schema)?;
        writer.delete_term(Term::from_field_text(field, unique_id));
        Ok(())
    }

    /// Builds the document representation of one record.
    ///
    /// Sets the unique id, the path (when the schema declares a path field),
    /// and every record field whose name resolves in the schema; unknown
    /// field names are skipped. Returns `None` when no content field mapped.
    /// Assumes the schema declares the unique id field; callers going
    /// through [`update`](Self::update)/[`add`](Self::add) have that checked
    /// first.
    pub fn build_document(
        &self,
        record: &ContentRecord,
        schema: &Schema,
    ) -> Option<TantivyDocument> {
        let unique_id_field = schema.get_field(UNIQUE_ID_FIELD).ok()?;

        let mut document = TantivyDocument::new();
        document.add_text(unique_id_field, &record.unique_id);

        if let Ok(path_field) = schema.get_field(PATH_FIELD) {
            document.add_text(path_field, &record.path);
        }

        let mut mapped = 0;
        for (name, value) in &record.fields {
            if let Ok(field) = schema.get_field(name) {
                document.add_text(field, value);
                mapped += 1;
            }
        }

        if mapped == 0 {
            return None;
        }

        Some(document)
    }

    /// Scope-checks and builds the document, logging the skip reasons.
    fn admit(&self, record: &ContentRecord, schema: &Schema) -> Option<TantivyDocument> {
        if !self.in_scope(&record.path) {
            warn!(
                unique_id = %record.unique_id,
                path = %record.path,
                "record outside configured root paths, skipping"
            );
            return None;
        }

        let document = self.build_document(record, schema);
        if document.is_none() {
            warn!(
                unique_id = %record.unique_id,
                "record produced no indexable document, skipping"
            );
        }
        document
    }

    /// Whether a record path falls under the configured roots.
    fn in_scope(&self, path: &str) -> bool {
        if self.root_paths.is_empty() {
            return true;
        }
        let lowered = path.to_lowercase();
        self.root_paths.iter().any(|root| lowered.contains(root))
    }
}

/// Resolves the unique id field, which the schema must declare.
fn unique_id_field(schema: &Schema) -> Result<Field, ContentError> {
    schema
        .get_field(UNIQUE_ID_FIELD)
        .map_err(|_| ContentError::MissingUniqueIdField)
}

#[cfg(test)]
mod tests {
    use tanq_index::{EngineQueryBuilder, Search};
    use tantivy::schema::{STORED, STRING, TEXT};

    use super::*;

    fn content_schema() -> Schema {
        let mut builder = Schema::builder();
        builder.add_text_field(UNIQUE_ID_FIELD, STRING | STORED);
        builder.add_text_field(PATH_FIELD, STRING | STORED);
        builder.add_text_field("title", TEXT | STORED);
        builder.add_text_field("body", TEXT | STORED);
        builder.build()
    }

    fn writer() -> IndexWriter {
        IndexWriter::create_in_ram(content_schema()).unwrap()
    }

    fn record(id: &str, path: &str) -> ContentRecord {
        ContentRecord::new(id, path)
            .with_field("title", "welcome")
            .with_field("body", "hello world")
    }

    fn count_matching(writer: &IndexWriter, field: &str, value: &str) -> usize {
        let search = Search::from_index(writer.index().clone()).unwrap();
        let mut builder = EngineQueryBuilder::new();
        builder.term(field, value);
        search.execute(&builder).unwrap().total_hits()
    }

    #[test]
    fn update_stages_in_scope_record() {
        let mut writer = writer();
        let operations = IndexOperations::new(vec!["/site/content".to_string()]);

        let staged = operations
            .update(&record("item-1", "/site/content/home"), &mut writer)
            .unwrap();
        writer.commit().unwrap();

        assert!(staged);
        assert_eq!(writer.num_docs().unwrap(), 1);
    }

    #[test]
    fn update_skips_out_of_scope_record() {
        let mut writer = writer();
        let operations = IndexOperations::new(vec!["/site/content".to_string()]);

        let staged = operations
            .update(&record("item-1", "/other/tree/home"), &mut writer)
            .unwrap();
        writer.commit().unwrap();

        assert!(!staged);
        assert_eq!(writer.num_docs().unwrap(), 0);
    }

    #[test]
    fn scope_check_is_case_insensitive() {
        let operations = IndexOperations::new(vec!["/Site/Content".to_string()]);
        assert!(operations.in_scope("/site/content/home"));
        assert!(!operations.in_scope("/site/other"));
    }

    #[test]
    fn unscoped_operations_admit_everything() {
        let mut writer = writer();
        let operations = IndexOperations::unscoped();

        assert!(
            operations
                .add(&record("item-1", "/anywhere"), &mut writer)
                .unwrap()
        );
    }

    #[test]
    fn update_replaces_prior_version() {
        let mut writer = writer();
        let operations = IndexOperations::unscoped();

        operations
            .update(
                &ContentRecord::new("item-1", "/a").with_field("body", "first"),
                &mut writer,
            )
            .unwrap();
        writer.commit().unwrap();

        operations
            .update(
                &ContentRecord::new("item-1", "/a").with_field("body", "second"),
                &mut writer,
            )
            .unwrap();
        writer.commit().unwrap();

        assert_eq!(writer.num_docs().unwrap(), 1);
        assert_eq!(count_matching(&writer, "body", "second"), 1);
        assert_eq!(count_matching(&writer, "body", "first"), 0);
    }

    #[test]
    fn delete_removes_record_by_unique_id() {
        let mut writer = writer();
        let operations = IndexOperations::unscoped();

        operations.update(&record("item-1", "/a"), &mut writer).unwrap();
        operations.update(&record("item-2", "/b"), &mut writer).unwrap();
        writer.commit().unwrap();

        operations.delete("item-1", &mut writer).unwrap();
        writer.commit().unwrap();

        assert_eq!(writer.num_docs().unwrap(), 1);
        assert_eq!(count_matching(&writer, UNIQUE_ID_FIELD, "item-2"), 1);

        // Deleting an unknown id is a no-op.
        operations.delete("item-9", &mut writer).unwrap();
        writer.commit().unwrap();
        assert_eq!(writer.num_docs().unwrap(), 1);
    }

    #[test]
    fn record_with_no_mappable_fields_is_skipped() {
        let mut writer = writer();
        let operations = IndexOperations::unscoped();

        let unmapped = ContentRecord::new("item-1", "/a").with_field("unknown_field", "value");
        let staged = operations.update(&unmapped, &mut writer).unwrap();
        writer.commit().unwrap();

        assert!(!staged);
        assert_eq!(writer.num_docs().unwrap(), 0);
    }

    #[test]
    fn build_document_maps_known_fields_only() {
        let operations = IndexOperations::unscoped();
        let schema = content_schema();

        let mixed = ContentRecord::new("item-1", "/a")
            .with_field("title", "kept")
            .with_field("unknown_field", "dropped");
        let document = operations.build_document(&mixed, &schema).unwrap();

        let title = schema.get_field("title").unwrap();
        assert_eq!(document.get_all(title).count(), 1);
    }

    #[test]
    fn missing_unique_id_field_is_an_error() {
        let mut builder = Schema::builder();
        builder.add_text_field("body", TEXT | STORED);
        let mut writer = IndexWriter::create_in_ram(builder.build()).unwrap();

        let operations = IndexOperations::unscoped();
        let error = operations
            .update(&record("item-1", "/a"), &mut writer)
            .unwrap_err();

        assert!(matches!(error, ContentError::MissingUniqueIdField));
    }
}
