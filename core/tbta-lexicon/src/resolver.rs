use serde::Serialize;
use tbta_protocol::{Concept, ConceptId, PartOfSpeech};

use crate::index::ConceptStore;

/// Which fallback produced a match, strictest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MatchTier {
    /// Stem, part of speech and sense.
    Exact,
    /// Stem and part of speech; sense ignored.
    StemPos,
    /// Stem ignoring case, and part of speech.
    FoldedStemPos,
    /// Stem ignoring case only.
    FoldedStem,
}

impl MatchTier {
    pub const ALL: [MatchTier; 4] = [
        MatchTier::Exact,
        MatchTier::StemPos,
        MatchTier::FoldedStemPos,
        MatchTier::FoldedStem,
    ];

    pub const fn rank(self) -> u8 {
        self as u8 + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'c> {
    pub concept: &'c Concept,
    pub tier: MatchTier,
}

/// Maps a (stem, part of speech, sense) triple to a concept.
///
/// Tiers run in order and the first one with a candidate wins. Within a
/// tier the first candidate in lexicon stored order is taken; homographs are
/// not disambiguated. No match is `None`, never an error.
pub struct Resolver<'s, S: ConceptStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: ConceptStore + ?Sized> Resolver<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    pub fn resolve(
        &self,
        stem: &str,
        part_of_speech: Option<PartOfSpeech>,
        sense: Option<char>,
    ) -> Option<ConceptId> {
        self.resolve_match(stem, part_of_speech, sense).map(|m| m.concept.id)
    }

    pub fn resolve_match(
        &self,
        stem: &str,
        part_of_speech: Option<PartOfSpeech>,
        sense: Option<char>,
    ) -> Option<Match<'s>> {
        if stem.is_empty() {
            return None;
        }

        let store: &'s S = self.store;
        let exact = store.with_stem(stem);
        let folded = store.with_folded_stem(stem);
        let same_pos = |c: &&Concept| Some(c.part_of_speech) == part_of_speech;

        for tier in MatchTier::ALL {
            let found = match tier {
                MatchTier::Exact => match sense {
                    Some(_) => exact.iter().copied().filter(same_pos).find(|c| c.sense == sense),
                    None => None,
                },
                MatchTier::StemPos => exact.iter().copied().find(same_pos),
                MatchTier::FoldedStemPos => folded.iter().copied().find(same_pos),
                MatchTier::FoldedStem => folded.first().copied(),
            };

            if let Some(concept) = found {
                return Some(Match { concept, tier });
            }
        }

        None
    }
}
