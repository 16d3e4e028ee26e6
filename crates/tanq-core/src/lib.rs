//! Fluent boolean query construction for tanq.
//!
//! This crate provides the engine-agnostic query builder: a mutable clause
//! tree assembled through a fluent API and handed to an engine binding for
//! compilation. It covers:
//!
//! - **Clauses**: term, range, wildcard, fuzzy, and phrase primitives, plus
//!   raw injection of an already-native engine query
//! - **Occurrence**: whether a clause must ([`Occurrence::Always`]), may
//!   ([`Occurrence::Sometimes`]), or must not ([`Occurrence::Never`]) match
//! - **Keyed addressing**: every clause lives under a string key so it can be
//!   replaced or removed without rebuilding the tree
//! - **Groups**: nested sub-builders compiled independently and folded into
//!   the parent under one occurrence
//! - **Combinators**: `and`/`or`/`setup` closures that scope the default
//!   occurrence for the clauses added inside them
//! - **Sorting**: multi-field sort specs consumed at execution time
//!
//! The builder is generic over the opaque engine query handle `Q`; an engine
//! binding fixes `Q` to its native query type and walks the tree through the
//! [`QueryBuilderVisitor`] seam.
//!
//! # Example
//!
//! ```
//! use tanq_core::{Occurrence, QueryBuilder};
//!
//! let mut builder = QueryBuilder::<()>::new();
//! builder
//!     .term("title", "africa")
//!     .or(|b| {
//!         b.term("description", "wildlife");
//!         b.term("description", "safari");
//!     });
//!
//! assert_eq!(builder.clauses().len(), 3);
//! assert_eq!(builder.clauses().iter().next().unwrap().1.occurrence, Occurrence::Always);
//! ```

#![warn(missing_docs)]

mod builder;
mod clause;
mod occurrence;
mod phrase;
mod sort;
mod store;
mod visitor;

pub use builder::{Group, QueryBuilder};
pub use clause::{ClausePrimitive, ClauseReference, DEFAULT_FUZZY_DISTANCE};
pub use occurrence::Occurrence;
pub use phrase::PhraseBuilder;
pub use sort::SortSpec;
pub use store::ClauseKeyStore;
pub use visitor::QueryBuilderVisitor;
