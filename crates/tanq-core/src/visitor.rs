//! Visitor seam between the builder and engine bindings.

use crate::builder::QueryBuilder;

/// Read-only traversal of a builder tree.
///
/// An engine binding implements this to turn a [`QueryBuilder`] (its clauses
/// plus, recursively, its child groups) into one composite engine-native
/// query. Visiting must not mutate the tree: a builder compiled twice without
/// intervening mutation yields two equivalent, independent outputs.
pub trait QueryBuilderVisitor<Q> {
    /// Result of a successful visit.
    type Output;
    /// Failure surfaced during the visit.
    type Error;

    /// Visits one builder and everything beneath it.
    fn visit_builder(&mut self, builder: &QueryBuilder<Q>) -> Result<Self::Output, Self::Error>;
}
