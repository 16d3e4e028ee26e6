//! Sub-builder for phrase clauses.

use crate::{clause::ClausePrimitive, store::ClauseKeyStore};

/// A builder scoped to one registered phrase clause.
///
/// Returned by [`QueryBuilder::phrase`](crate::QueryBuilder::phrase); each
/// [`add_term`](Self::add_term) call appends one `(field, value)` pair to the
/// phrase, which compiles into a single phrase primitive.
#[derive(Debug)]
pub struct PhraseBuilder<'a, Q> {
    /// The store holding the phrase clause.
    store: &'a mut ClauseKeyStore<Q>,
    /// Key of the phrase clause inside `store`.
    key: String,
}

impl<'a, Q> PhraseBuilder<'a, Q> {
    /// Creates a sub-builder for the phrase clause under `key`.
    pub(crate) fn new(store: &'a mut ClauseKeyStore<Q>, key: String) -> Self {
        Self { store, key }
    }

    /// Appends one term to the phrase.
    pub fn add_term(&mut self, field: impl Into<String>, value: impl Into<String>) -> &mut Self {
        if let Some(reference) = self.store.get_mut(&self.key) {
            if let ClausePrimitive::Phrase { terms, .. } = &mut reference.primitive {
                terms.push((field.into(), value.into()));
            }
        }
        self
    }

    /// The key the phrase clause lives under, for later removal or
    /// replacement through the owning builder.
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use crate::{ClausePrimitive, Occurrence, QueryBuilder};

    #[test]
    fn terms_accumulate_on_one_clause() {
        let mut builder = QueryBuilder::<()>::new();
        builder
            .phrase(2)
            .add_term("title", "wildlife")
            .add_term("title", "africa");

        assert_eq!(builder.clauses().len(), 1);
        let (_, reference) = builder.clauses().iter().next().unwrap();
        match &reference.primitive {
            ClausePrimitive::Phrase { terms, slop } => {
                assert_eq!(*slop, 2);
                assert_eq!(
                    terms,
                    &vec![
                        ("title".to_string(), "wildlife".to_string()),
                        ("title".to_string(), "africa".to_string())
                    ]
                );
            }
            other => panic!("expected phrase primitive, got {other:?}"),
        }
    }

    #[test]
    fn phrase_honors_default_occurrence_and_key() {
        let mut builder = QueryBuilder::<()>::new();
        builder.or(|b| {
            b.phrase_with(0, None, Some("p")).add_term("title", "a");
        });

        let stored = builder.clauses().get("p").unwrap();
        assert_eq!(stored.occurrence, Occurrence::Sometimes);
    }

    #[test]
    fn key_allows_later_removal() {
        let mut builder = QueryBuilder::<()>::new();
        let key = {
            let mut phrase = builder.phrase(1);
            phrase.add_term("title", "a");
            phrase.key().to_string()
        };

        assert!(builder.remove(&key));
        assert!(builder.is_empty());
    }
}
