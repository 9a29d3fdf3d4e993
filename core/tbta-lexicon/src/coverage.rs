use std::collections::BTreeMap;

use serde::Serialize;
use tbta_parser::DecodedWord;
use tbta_protocol::ConceptId;
use tracing::debug;

use crate::index::ConceptStore;
use crate::resolver::{MatchTier, Resolver};

/// A decoded word and the concept it resolved to, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedWord {
    #[serde(flatten)]
    pub word: DecodedWord,
    pub concept: Option<ConceptId>,
    pub tier: Option<MatchTier>,
}

/// Resolves every word of a verse.
pub fn annotate<S>(words: Vec<DecodedWord>, resolver: &Resolver<'_, S>) -> Vec<ResolvedWord>
where
    S: ConceptStore + ?Sized,
{
    words
        .into_iter()
        .map(|word| {
            let found = resolver.resolve_match(&word.stem, word.part_of_speech, word.sense);
            if found.is_none() {
                debug!(stem = %word.stem, category = %word.category, "no concept for word");
            }
            ResolvedWord {
                concept: found.map(|m| m.concept.id),
                tier: found.map(|m| m.tier),
                word,
            }
        })
        .collect()
}

/// Resolution statistics over a batch of verses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Coverage {
    pub verses: usize,
    pub words: usize,
    pub with_part_of_speech: usize,
    pub resolved: usize,
    pub by_tier: BTreeMap<MatchTier, usize>,
    pub unresolved: usize,
}

impl Coverage {
    /// Tallies one verse.
    pub fn record(&mut self, words: &[ResolvedWord]) {
        self.verses += 1;
        for resolved in words {
            self.words += 1;
            if resolved.word.part_of_speech.is_some() {
                self.with_part_of_speech += 1;
            }
            match resolved.tier {
                Some(tier) => {
                    self.resolved += 1;
                    *self.by_tier.entry(tier).or_default() += 1;
                }
                None => self.unresolved += 1,
            }
        }
    }

    pub fn merge(mut self, other: Coverage) -> Coverage {
        self.verses += other.verses;
        self.words += other.words;
        self.with_part_of_speech += other.with_part_of_speech;
        self.resolved += other.resolved;
        self.unresolved += other.unresolved;
        for (tier, count) in other.by_tier {
            *self.by_tier.entry(tier).or_default() += count;
        }
        self
    }

    /// Percentage of words with a part of speech.
    pub fn pos_rate(&self) -> f64 {
        percent(self.with_part_of_speech, self.words)
    }

    /// Percentage of words resolved to a concept.
    pub fn resolution_rate(&self) -> f64 {
        percent(self.resolved, self.words)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::ConceptIndex;
    use tbta_parser::decode_words;
    use tbta_protocol::{Concept, Lexicon, PartOfSpeech};

    fn index() -> ConceptIndex {
        let concept = |id, stem: &str, sense, part_of_speech| Concept {
            id: ConceptId(id),
            stem: stem.to_string(),
            sense,
            part_of_speech,
            gloss: String::new(),
            brief_gloss: None,
            level: None,
            categorization: None,
        };
        ConceptIndex::new(Lexicon {
            version: 1,
            concepts: vec![
                concept(1, "God", None, PartOfSpeech::Noun),
                concept(2, "create", Some('A'), PartOfSpeech::Verb),
                concept(3, "make", None, PartOfSpeech::Verb),
            ],
        })
    }

    const VERSE: &str = "~\\wd~\\tgc-IDp~\\lu{\
        ~\\wd~\\tgN-1A1SDAnK3NN........~\\luGod\
        ~\\wd~\\tgV-1AIIAA~\\lumake/Acreate\
        ~\\wd~\\tgZ~\\luxyzzy\
        ~\\wd~\\tgc-IDp~\\lu}";

    #[test]
    fn test_annotate_verse() {
        let index = index();
        let resolver = Resolver::new(&index);
        let words = annotate(decode_words(VERSE), &resolver);

        let found: Vec<_> = words.iter().map(|w| (w.word.stem.as_str(), w.concept, w.tier)).collect();
        assert_eq!(
            found,
            vec![
                ("god", Some(ConceptId(1)), Some(MatchTier::FoldedStemPos)),
                ("make", Some(ConceptId(3)), Some(MatchTier::StemPos)),
                ("create", Some(ConceptId(2)), Some(MatchTier::Exact)),
                ("xyzzy", None, None),
            ]
        );
    }

    #[test]
    fn test_coverage_rates() {
        let index = index();
        let resolver = Resolver::new(&index);

        let mut first = Coverage::default();
        first.record(&annotate(decode_words(VERSE), &resolver));
        let mut second = Coverage::default();
        second.record(&annotate(decode_words("~\\wd~\\tgN-1~\\luGod"), &resolver));

        let total = first.merge(second);
        assert_eq!(total.verses, 2);
        assert_eq!(total.words, 5);
        assert_eq!(total.with_part_of_speech, 4);
        assert_eq!(total.resolved, 4);
        assert_eq!(total.unresolved, 1);
        assert_eq!(total.by_tier.get(&MatchTier::FoldedStemPos), Some(&2));
        assert!((total.pos_rate() - 80.0).abs() < 1e-9);
        assert!((total.resolution_rate() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_coverage() {
        let coverage = Coverage::default();
        assert_eq!(coverage.pos_rate(), 0.0);
        assert_eq!(coverage.resolution_rate(), 0.0);
    }
}
