//! Clause primitives and references.
//!
//! A clause is one atomic search condition: an engine-agnostic primitive
//! describing what to match, paired with the [`Occurrence`] describing how it
//! participates in its group.

use crate::occurrence::Occurrence;

/// Default Levenshtein distance for fuzzy clauses.
pub const DEFAULT_FUZZY_DISTANCE: u8 = 1;

/// One search primitive, before compilation to an engine-native query.
///
/// The variants cover the supported clause kinds as plain data; `Q` is the
/// opaque handle type of an already-native engine query, used only by the
/// [`Raw`](Self::Raw) interop variant. Field identifiers are strings and are
/// not validated here; resolution against the index schema happens at compile
/// time.
#[derive(Debug, Clone, PartialEq)]
pub enum ClausePrimitive<Q> {
    /// A single term in a single field.
    Term {
        /// Field identifier.
        field: String,
        /// Term value, passed to the engine verbatim.
        value: String,
    },

    /// A lexical term range over a single field.
    Range {
        /// Field identifier.
        field: String,
        /// Lower bound; `None` means unbounded below.
        lower: Option<String>,
        /// Upper bound; `None` means unbounded above.
        upper: Option<String>,
        /// Whether the lower bound itself matches.
        include_lower: bool,
        /// Whether the upper bound itself matches.
        include_upper: bool,
    },

    /// A wildcard pattern: `*` matches any run of characters, `?` any single
    /// character.
    Wildcard {
        /// Field identifier.
        field: String,
        /// The wildcard pattern.
        pattern: String,
    },

    /// A fuzzy term match within a Levenshtein distance.
    Fuzzy {
        /// Field identifier.
        field: String,
        /// Term value to match approximately.
        value: String,
        /// Maximum edit distance.
        distance: u8,
    },

    /// An ordered multi-term phrase with positional slop tolerance.
    ///
    /// Terms are `(field, value)` pairs; the engine requires every term of
    /// one phrase to share a single field.
    Phrase {
        /// Ordered `(field, value)` pairs.
        terms: Vec<(String, String)>,
        /// Positional slop tolerance.
        slop: u32,
    },

    /// An already-native engine query, stored and compiled like any other
    /// clause: an interop escape hatch, and the way a previously compiled
    /// sub-expression re-enters a builder.
    Raw(Q),
}

/// One clause: an occurrence requirement plus one primitive.
///
/// Immutable once constructed; adding a clause under an existing key replaces
/// the whole reference rather than mutating it. (The phrase sub-builder is
/// the one sanctioned exception: it appends terms to the phrase primitive it
/// is scoped to, before compilation.)
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseReference<Q> {
    /// How the clause participates in its group.
    pub occurrence: Occurrence,
    /// What the clause matches.
    pub primitive: ClausePrimitive<Q>,
}

impl<Q> ClauseReference<Q> {
    /// Creates a clause reference.
    pub fn new(occurrence: Occurrence, primitive: ClausePrimitive<Q>) -> Self {
        Self {
            occurrence,
            primitive,
        }
    }
}
