//! Tantivy binding for the tanq query builder.
//!
//! This crate turns builder trees from `tanq-core` into executable engine
//! queries and runs them. It handles:
//!
//! - Compilation of the clause tree into one composite boolean query
//!   ([`QueryCompiler`]), with the fixed occurrence mapping
//!   `Always`→MUST, `Sometimes`→SHOULD, `Never`→MUST_NOT
//! - Query execution with exact hit counts, elapsed timing, and paged,
//!   sorted document access ([`Search`], [`ExecuteResult`])
//! - A thin writer passthrough for staging and committing documents
//!   ([`IndexWriter`])
//!
//! # Example
//!
//! ```no_run
//! use tanq_index::{EngineQueryBuilder, Search};
//!
//! let search = Search::open("./index".as_ref()).unwrap();
//!
//! let mut builder = EngineQueryBuilder::new();
//! builder.term("title", "africa").or(|b| {
//!     b.term("description", "wildlife");
//!     b.term("description", "safari");
//! });
//!
//! let result = search.execute(&builder).unwrap();
//! println!("{} hits in {} ms", result.total_hits(), result.elapsed_ms());
//! ```

#![warn(missing_docs)]

mod compile;
mod error;
mod search;
mod writer;

pub use compile::{EngineQuery, EngineQueryBuilder, QueryCompiler};
pub use error::SearchError;
pub use search::{ExecuteResult, MAX_RETRIEVED_DOCS, ScoredDocument, Search};
pub use writer::IndexWriter;
