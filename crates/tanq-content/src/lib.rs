//! Content-store indexing adapter for tanq.
//!
//! Bridges a CMS-style content store and the search index: given one content
//! record, [`IndexOperations`] builds the document representation and stages
//! it through a [`tanq_index::IndexWriter`], or requests deletion of a
//! previously indexed record by its unique identifier. It handles:
//!
//! - Root-path scoping: records outside the configured roots are skipped
//!   without error
//! - Document construction: record fields map onto schema fields by name;
//!   records yielding nothing indexable are skipped with a warning
//! - Update semantics: delete-by-unique-id followed by a fresh add, so
//!   re-crawled records never duplicate
//!
//! # Example
//!
//! ```no_run
//! use tanq_content::{ContentRecord, IndexOperations};
//! use tanq_index::IndexWriter;
//! use tantivy::schema::{STORED, STRING, Schema, TEXT};
//!
//! let mut builder = Schema::builder();
//! builder.add_text_field("unique_id", STRING | STORED);
//! builder.add_text_field("path", STRING | STORED);
//! builder.add_text_field("body", TEXT | STORED);
//!
//! let mut writer = IndexWriter::open("./index".as_ref(), builder.build()).unwrap();
//! let operations = IndexOperations::new(vec!["/site/content".to_string()]);
//!
//! let record = ContentRecord::new("item-1", "/site/content/home")
//!     .with_field("body", "welcome");
//! operations.update(&record, &mut writer).unwrap();
//! writer.commit().unwrap();
//! ```

#![warn(missing_docs)]

mod error;
mod ops;
mod record;

pub use error::ContentError;
pub use ops::{IndexOperations, PATH_FIELD, UNIQUE_ID_FIELD};
pub use record::ContentRecord;
