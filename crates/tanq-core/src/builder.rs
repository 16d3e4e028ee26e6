//! The fluent query builder.
//!
//! A [`QueryBuilder`] owns one clause store plus an ordered sequence of child
//! groups, and exposes the clause-adding and combinator APIs. Every
//! clause-adding operation returns `&mut Self` so calls chain; later
//! operations see earlier mutations.

use std::mem;

use crate::{
    clause::{ClausePrimitive, ClauseReference, DEFAULT_FUZZY_DISTANCE},
    occurrence::Occurrence,
    phrase::PhraseBuilder,
    sort::SortSpec,
    store::ClauseKeyStore,
    visitor::QueryBuilderVisitor,
};

/// One nested group: a child builder plus the occurrence its compiled result
/// participates under in the parent.
#[derive(Debug, Clone)]
pub struct Group<Q> {
    /// How the compiled group participates in the parent.
    occurrence: Occurrence,
    /// The child builder.
    builder: QueryBuilder<Q>,
}

impl<Q> Group<Q> {
    /// The occurrence the group was registered under in its parent.
    pub fn occurrence(&self) -> Occurrence {
        self.occurrence
    }

    /// The child builder.
    pub fn builder(&self) -> &QueryBuilder<Q> {
        &self.builder
    }
}

/// A mutable boolean query under construction.
///
/// Single-owner and sequential: mutate through the fluent API, then hand the
/// builder (read-only) to a compiler. The builder stays usable afterward for
/// a further round of add/remove/re-compile.
#[derive(Debug, Clone)]
pub struct QueryBuilder<Q> {
    /// Keyed clauses in insertion order.
    clauses: ClauseKeyStore<Q>,
    /// Child groups in insertion order, compiled after the clauses.
    groups: Vec<Group<Q>>,
    /// Occurrence applied to clauses added without an explicit one.
    default_occurrence: Occurrence,
    /// Sort specs consumed by the execution collaborator, in priority order.
    sorts: Vec<SortSpec>,
}

impl<Q> QueryBuilder<Q> {
    /// Creates an empty builder with default occurrence [`Occurrence::Always`].
    pub fn new() -> Self {
        Self {
            clauses: ClauseKeyStore::new(),
            groups: Vec::new(),
            default_occurrence: Occurrence::Always,
            sorts: Vec::new(),
        }
    }

    /// The clauses added so far.
    pub fn clauses(&self) -> &ClauseKeyStore<Q> {
        &self.clauses
    }

    /// The child groups added so far.
    pub fn groups(&self) -> &[Group<Q>] {
        &self.groups
    }

    /// The sort specs added so far, in priority order.
    pub fn sorts(&self) -> &[SortSpec] {
        &self.sorts
    }

    /// The occurrence currently applied to clauses added without an explicit
    /// one.
    pub fn default_occurrence(&self) -> Occurrence {
        self.default_occurrence
    }

    /// Whether the builder holds no clauses anywhere in its tree.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.groups.iter().all(|group| group.builder.is_empty())
    }

    /// Adds a term clause.
    pub fn term(&mut self, field: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.term_with(field, value, None, None)
    }

    /// Adds a term clause with explicit occurrence and key.
    pub fn term_with(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
        occurrence: Option<Occurrence>,
        key: Option<&str>,
    ) -> &mut Self {
        self.put(
            ClausePrimitive::Term {
                field: field.into(),
                value: value.into(),
            },
            occurrence,
            key,
        )
    }

    /// Adds one term clause per value, all sharing `occurrence`.
    ///
    /// Expresses "any of" (`Sometimes`) or "all of" (`Always`) over a value
    /// set in one call; compiles identically to the equivalent sequence of
    /// individual [`term_with`](Self::term_with) calls.
    pub fn terms<I, V>(&mut self, field: &str, values: I, occurrence: Occurrence) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for value in values {
            self.term_with(field, value, Some(occurrence), None);
        }
        self
    }

    /// Adds a term range clause with both bounds inclusive.
    pub fn term_range(
        &mut self,
        field: impl Into<String>,
        lower: impl Into<String>,
        upper: impl Into<String>,
    ) -> &mut Self {
        self.term_range_with(
            field,
            Some(lower.into()),
            Some(upper.into()),
            true,
            true,
            None,
            None,
        )
    }

    /// Adds a term range clause with explicit bounds, inclusivity,
    /// occurrence, and key. A `None` bound is unbounded on that side.
    #[allow(clippy::too_many_arguments)]
    pub fn term_range_with(
        &mut self,
        field: impl Into<String>,
        lower: Option<String>,
        upper: Option<String>,
        include_lower: bool,
        include_upper: bool,
        occurrence: Option<Occurrence>,
        key: Option<&str>,
    ) -> &mut Self {
        self.put(
            ClausePrimitive::Range {
                field: field.into(),
                lower,
                upper,
                include_lower,
                include_upper,
            },
            occurrence,
            key,
        )
    }

    /// Adds a wildcard clause (`*` any run, `?` any single character).
    pub fn wildcard(&mut self, field: impl Into<String>, pattern: impl Into<String>) -> &mut Self {
        self.wildcard_with(field, pattern, None, None)
    }

    /// Adds a wildcard clause with explicit occurrence and key.
    pub fn wildcard_with(
        &mut self,
        field: impl Into<String>,
        pattern: impl Into<String>,
        occurrence: Option<Occurrence>,
        key: Option<&str>,
    ) -> &mut Self {
        self.put(
            ClausePrimitive::Wildcard {
                field: field.into(),
                pattern: pattern.into(),
            },
            occurrence,
            key,
        )
    }

    /// Adds a fuzzy clause with the default edit distance.
    pub fn fuzzy(&mut self, field: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fuzzy_with(field, value, DEFAULT_FUZZY_DISTANCE, None, None)
    }

    /// Adds a fuzzy clause with explicit distance, occurrence, and key.
    pub fn fuzzy_with(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
        distance: u8,
        occurrence: Option<Occurrence>,
        key: Option<&str>,
    ) -> &mut Self {
        self.put(
            ClausePrimitive::Fuzzy {
                field: field.into(),
                value: value.into(),
                distance,
            },
            occurrence,
            key,
        )
    }

    /// Registers a phrase clause and returns a sub-builder scoped to it.
    ///
    /// Terms are appended through [`PhraseBuilder::add_term`]; `slop` is the
    /// positional tolerance between consecutive terms.
    pub fn phrase(&mut self, slop: u32) -> PhraseBuilder<'_, Q> {
        self.phrase_with(slop, None, None)
    }

    /// Registers a phrase clause with explicit occurrence and key.
    pub fn phrase_with(
        &mut self,
        slop: u32,
        occurrence: Option<Occurrence>,
        key: Option<&str>,
    ) -> PhraseBuilder<'_, Q> {
        let occurrence = occurrence.unwrap_or(self.default_occurrence);
        let key = self.clauses.put(
            key,
            ClauseReference::new(
                occurrence,
                ClausePrimitive::Phrase {
                    terms: Vec::new(),
                    slop,
                },
            ),
        );
        PhraseBuilder::new(&mut self.clauses, key)
    }

    /// Injects an already-native engine query as a clause.
    ///
    /// Stored and compiled exactly like any builder-constructed clause.
    pub fn add(&mut self, raw: Q, occurrence: Occurrence, key: Option<&str>) -> &mut Self {
        self.put(ClausePrimitive::Raw(raw), Some(occurrence), key)
    }

    /// Removes the clause under `key`; `false` (not an error) when absent.
    pub fn remove(&mut self, key: &str) -> bool {
        self.clauses.remove(key)
    }

    /// Creates and registers a child group participating under the current
    /// default occurrence, returning it for independent population.
    ///
    /// The child's own default occurrence starts at [`Occurrence::Always`].
    /// An empty group is elided at compile time.
    pub fn group(&mut self) -> &mut Self {
        let occurrence = self.default_occurrence;
        self.group_with(occurrence)
    }

    /// Creates and registers a child group under an explicit occurrence.
    pub fn group_with(&mut self, occurrence: Occurrence) -> &mut Self {
        let index = self.groups.len();
        self.groups.push(Group {
            occurrence,
            builder: Self::new(),
        });
        &mut self.groups[index].builder
    }

    /// Runs `setup` against this builder with default occurrence
    /// [`Occurrence::Always`], restoring the previous default afterward.
    pub fn and(&mut self, setup: impl FnOnce(&mut Self)) -> &mut Self {
        self.scoped(Occurrence::Always, setup)
    }

    /// Runs `setup` against this builder with default occurrence
    /// [`Occurrence::Sometimes`], restoring the previous default afterward.
    pub fn or(&mut self, setup: impl FnOnce(&mut Self)) -> &mut Self {
        self.scoped(Occurrence::Sometimes, setup)
    }

    /// Runs `setup` against this builder without changing the default
    /// occurrence. Pure chaining convenience.
    pub fn setup(&mut self, setup: impl FnOnce(&mut Self)) -> &mut Self {
        setup(self);
        self
    }

    /// Appends an ascending sort on `field`.
    ///
    /// Sorts apply in the order added; the execution collaborator consumes
    /// them, compilation ignores them.
    pub fn sort(&mut self, field: impl Into<String>) -> &mut Self {
        self.sorts.push(SortSpec::ascending(field));
        self
    }

    /// Appends a descending sort on `field`.
    pub fn sort_descending(&mut self, field: impl Into<String>) -> &mut Self {
        self.sorts.push(SortSpec::descending(field));
        self
    }

    /// Hands the builder to a visitor (read-only traversal).
    pub fn accept<V>(&self, visitor: &mut V) -> Result<V::Output, V::Error>
    where
        V: QueryBuilderVisitor<Q>,
    {
        visitor.visit_builder(self)
    }

    /// Wraps a primitive in a reference and forwards to the store.
    fn put(
        &mut self,
        primitive: ClausePrimitive<Q>,
        occurrence: Option<Occurrence>,
        key: Option<&str>,
    ) -> &mut Self {
        let occurrence = occurrence.unwrap_or(self.default_occurrence);
        self.clauses
            .put(key, ClauseReference::new(occurrence, primitive));
        self
    }

    /// Runs `setup` under a temporary default occurrence.
    fn scoped(&mut self, occurrence: Occurrence, setup: impl FnOnce(&mut Self)) -> &mut Self {
        let previous = mem::replace(&mut self.default_occurrence, occurrence);
        setup(self);
        self.default_occurrence = previous;
        self
    }
}

impl<Q> Default for QueryBuilder<Q> {
    fn default() -> Self {
        Self::new()
    }
}
