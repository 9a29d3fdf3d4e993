use std::collections::HashMap;

use tbta_protocol::{Concept, Lexicon};

/// Stem lookup over a concept lexicon.
///
/// Both lookups return candidates in lexicon stored order.
pub trait ConceptStore {
    /// Concepts whose stem equals `stem` exactly.
    fn with_stem(&self, stem: &str) -> Vec<&Concept>;

    /// Concepts whose stem equals `stem` ignoring case.
    fn with_folded_stem(&self, stem: &str) -> Vec<&Concept>;
}

/// In-memory hash index over an owned lexicon. Immutable once built.
#[derive(Debug, Default)]
pub struct ConceptIndex {
    lexicon: Lexicon,
    by_stem: HashMap<String, Vec<usize>>,
    by_folded_stem: HashMap<String, Vec<usize>>,
}

impl ConceptIndex {
    pub fn new(lexicon: Lexicon) -> Self {
        let mut by_stem: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_folded_stem: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, concept) in lexicon.concepts.iter().enumerate() {
            by_stem.entry(concept.stem.clone()).or_default().push(position);
            by_folded_stem
                .entry(concept.stem.to_lowercase())
                .or_default()
                .push(position);
        }

        Self { lexicon, by_stem, by_folded_stem }
    }

    pub fn len(&self) -> usize {
        self.lexicon.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.concepts.is_empty()
    }

    fn collect(&self, positions: Option<&Vec<usize>>) -> Vec<&Concept> {
        positions
            .map(|positions| positions.iter().map(|&p| &self.lexicon.concepts[p]).collect())
            .unwrap_or_default()
    }
}

impl From<Lexicon> for ConceptIndex {
    fn from(lexicon: Lexicon) -> Self {
        Self::new(lexicon)
    }
}

impl ConceptStore for ConceptIndex {
    fn with_stem(&self, stem: &str) -> Vec<&Concept> {
        self.collect(self.by_stem.get(stem))
    }

    fn with_folded_stem(&self, stem: &str) -> Vec<&Concept> {
        self.collect(self.by_folded_stem.get(&stem.to_lowercase()))
    }
}
