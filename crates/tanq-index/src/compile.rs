//! Query compiler.
//!
//! Compiles a builder's clause tree into Tantivy queries.

use std::ops::Bound;

use tanq_core::{ClausePrimitive, Occurrence, QueryBuilder, QueryBuilderVisitor};
use tantivy::{
    Term,
    query::{
        BooleanQuery, FuzzyTermQuery, Occur, PhraseQuery, Query, RangeQuery, RegexQuery, TermQuery,
    },
    schema::{Field, IndexRecordOption, Schema, Type},
};

use crate::error::SearchError;

/// The engine-native query handle: any boxed Tantivy query.
pub type EngineQuery = Box<dyn Query>;

/// A builder over the Tantivy query handle.
pub type EngineQueryBuilder = QueryBuilder<EngineQuery>;

/// Compiles a builder tree into one composite Tantivy query.
///
/// Compilation is a pure function of the tree: it walks the clause store in
/// insertion order, then each child group in insertion order (recursively
/// compiling the child first), and maps every clause's occurrence onto the
/// engine's boolean model (`Always`→MUST, `Sometimes`→SHOULD,
/// `Never`→MUST_NOT). Empty groups compile to nothing and are omitted from
/// the parent. Compiling twice yields two independently executable queries,
/// and mutating the builder afterward never affects an earlier snapshot.
///
/// A clause set containing only `Never` entries is forwarded to the engine
/// unchanged; Tantivy defines such a boolean query to match nothing, other
/// engines differ, so the compiler does not rewrite it.
pub struct QueryCompiler {
    /// Schema the clause field identifiers resolve against.
    schema: Schema,
}

impl QueryCompiler {
    /// Creates a compiler resolving fields against `schema`.
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Compiles a builder (and all descendant groups) into one query.
    ///
    /// Returns `None` when the tree holds no effective clauses, `Some` for a
    /// compilable tree, or an error for a clause the engine cannot express
    /// ([`SearchError::InvalidClauseValue`]).
    pub fn compile(
        &self,
        builder: &QueryBuilder<EngineQuery>,
    ) -> Result<Option<EngineQuery>, SearchError> {
        let mut clauses: Vec<(Occur, EngineQuery)> = Vec::new();

        for (_, reference) in builder.clauses().iter() {
            let query = self.compile_primitive(&reference.primitive)?;
            clauses.push((occur(reference.occurrence), query));
        }

        for group in builder.groups() {
            if let Some(nested) = self.compile(group.builder())? {
                clauses.push((occur(group.occurrence()), nested));
            }
        }

        if clauses.is_empty() {
            return Ok(None);
        }

        Ok(Some(Box::new(BooleanQuery::new(clauses))))
    }

    /// Compiles one clause primitive into its Tantivy query.
    fn compile_primitive(
        &self,
        primitive: &ClausePrimitive<EngineQuery>,
    ) -> Result<EngineQuery, SearchError> {
        match primitive {
            ClausePrimitive::Term { field, value } => {
                let term = Term::from_field_text(self.resolve_field(field)?, value);
                Ok(Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs)))
            }
            ClausePrimitive::Range {
                field,
                lower,
                upper,
                include_lower,
                include_upper,
            } => {
                let resolved = self.resolve_field(field)?;
                let lower_bound = range_bound(resolved, lower.as_deref(), *include_lower);
                let upper_bound = range_bound(resolved, upper.as_deref(), *include_upper);
                Ok(Box::new(RangeQuery::new_term_bounds(
                    field.clone(),
                    Type::Str,
                    &lower_bound,
                    &upper_bound,
                )))
            }
            ClausePrimitive::Wildcard { field, pattern } => {
                let field = self.resolve_field(field)?;
                let regex = wildcard_to_regex(pattern);
                let query = RegexQuery::from_pattern(&regex, field).map_err(|e| {
                    SearchError::invalid_clause(format!("invalid wildcard pattern {pattern:?}: {e}"))
                })?;
                Ok(Box::new(query))
            }
            ClausePrimitive::Fuzzy {
                field,
                value,
                distance,
            } => {
                let term = Term::from_field_text(self.resolve_field(field)?, value);
                Ok(Box::new(FuzzyTermQuery::new(term, *distance, true)))
            }
            ClausePrimitive::Phrase { terms, slop } => self.compile_phrase(terms, *slop),
            ClausePrimitive::Raw(query) => Ok(query.box_clone()),
        }
    }

    /// Compiles a phrase primitive.
    ///
    /// The engine requires one field per phrase and at least two terms; a
    /// single-term phrase degrades to a plain term query.
    fn compile_phrase(
        &self,
        terms: &[(String, String)],
        slop: u32,
    ) -> Result<EngineQuery, SearchError> {
        let Some((first_field, first_value)) = terms.first() else {
            return Err(SearchError::invalid_clause("phrase clause has no terms"));
        };

        if terms.iter().any(|(field, _)| field != first_field) {
            return Err(SearchError::invalid_clause(format!(
                "phrase clause spans multiple fields (expected all terms in {first_field:?})"
            )));
        }

        let field = self.resolve_field(first_field)?;

        if terms.len() == 1 {
            let term = Term::from_field_text(field, first_value);
            return Ok(Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs)));
        }

        let positioned: Vec<(usize, Term)> = terms
            .iter()
            .enumerate()
            .map(|(position, (_, value))| (position, Term::from_field_text(field, value)))
            .collect();

        Ok(Box::new(PhraseQuery::new_with_offset_and_slop(
            positioned, slop,
        )))
    }

    /// Resolves a field identifier against the schema.
    fn resolve_field(&self, name: &str) -> Result<Field, SearchError> {
        self.schema
            .get_field(name)
            .map_err(|_| SearchError::invalid_clause(format!("unknown field: {name}")))
    }
}

impl QueryBuilderVisitor<EngineQuery> for QueryCompiler {
    type Output = Option<EngineQuery>;
    type Error = SearchError;

    fn visit_builder(
        &mut self,
        builder: &QueryBuilder<EngineQuery>,
    ) -> Result<Self::Output, Self::Error> {
        self.compile(builder)
    }
}

/// Maps the occurrence model onto the engine's boolean occurrences.
fn occur(occurrence: Occurrence) -> Occur {
    match occurrence {
        Occurrence::Always => Occur::Must,
        Occurrence::Sometimes => Occur::Should,
        Occurrence::Never => Occur::MustNot,
    }
}

/// Builds one range bound; an absent value is unbounded.
fn range_bound(field: Field, value: Option<&str>, inclusive: bool) -> Bound<Term> {
    match value {
        Some(value) => {
            let term = Term::from_field_text(field, value);
            if inclusive {
                Bound::Included(term)
            } else {
                Bound::Excluded(term)
            }
        }
        None => Bound::Unbounded,
    }
}

/// Translates a wildcard pattern into the regex dialect the engine matches
/// whole terms against: `*` becomes `.*`, `?` becomes `.`, everything else
/// is matched literally.
fn wildcard_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 8);
    for ch in pattern.chars() {
        match ch {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '\\' => {
                regex.push('\\');
                regex.push(ch);
            }
            other => regex.push(other),
        }
    }
    regex
}
