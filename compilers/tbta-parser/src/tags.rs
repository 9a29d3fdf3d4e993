//! Positional decoding of TBTA feature tags.
//!
//! A tag is a fixed-width string such as `N-1A1SDAnK3NN........`. Its first
//! character names the part (uppercase for words, lowercase for phrases and
//! clauses) and every other feature lives at a fixed byte offset. Each level
//! has its own static slot table; nothing here allocates except verbatim
//! values.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tbta_protocol::{Feature, Part};

pub const CLAUSE_PREFIX: char = 'c';
pub const PERIOD_PREFIX: char = '.';

/// Values that carry no information once decoded.
pub const NULLISH: &[&str] = &["Not Applicable", "Unspecified", "."];

type CodeTable = &'static [(&'static str, &'static str)];

static PARTS: &[(char, Part)] = &[
    ('c', Part::Clause),
    ('n', Part::NounPhrase),
    ('v', Part::VerbPhrase),
    ('j', Part::AdjectivePhrase),
    ('a', Part::AdverbPhrase),
    ('N', Part::Noun),
    ('V', Part::Verb),
    ('A', Part::Adjective),
    ('D', Part::Adverb),
    ('P', Part::Adposition),
    ('C', Part::Conjunction),
    ('X', Part::Particle),
    ('R', Part::Particle),
    ('.', Part::Period),
];

static CLAUSE_TYPE: CodeTable = &[
    ("ID", "Independent"),
    ("DP", "Dependent"),
    ("PT", "Patient (Object Complement)"),
    ("RL", "Relative"),
];

static ILLOCUTIONARY_FORCE: CodeTable = &[
    ("p", "Declarative"),
    ("q", "Interrogative"),
    ("i", "Imperative"),
    ("j", "Jussive"),
    ("o", "Optative"),
    ("h", "Hortatory"),
];

static SEMANTIC_ROLE: CodeTable = &[
    ("A", "Most Agent-like"),
    ("P", "Most Patient-like"),
    ("N", "Not Applicable"),
];

static NUMBER: CodeTable = &[
    ("S", "Singular"),
    ("D", "Dual"),
    ("T", "Trial"),
    ("P", "Plural"),
    ("p", "Paucal"),
    ("Q", "Quadral"),
];

static PARTICIPANT_TRACKING: CodeTable = &[
    ("I", "First Mention"),
    ("D", "Routine"),
    ("R", "Restaging"),
    ("E", "Exiting"),
    ("F", "Frame Inferable"),
    ("G", "Generic"),
    ("i", "Interrogative"),
];

static PERSON: CodeTable = &[
    ("1", "First"),
    ("2", "Second"),
    ("3", "Third"),
    ("A", "First Inclusive"),
    ("B", "First Exclusive"),
];

static ASPECT: CodeTable = &[
    ("I", "Imperfective"),
    ("C", "Completive"),
    ("r", "Inceptive"),
    ("U", "Unmarked"),
];

static MOOD: CodeTable = &[("I", "Indicative")];

static POLARITY: CodeTable = &[("A", "Affirmative"), ("N", "Negative")];

static DEGREE: CodeTable = &[
    ("N", "No Degree"),
    ("C", "Comparative"),
    ("S", "Superlative"),
    ("I", "Intensified"),
];

/// How the characters of a slot map to a value.
#[derive(Debug)]
pub enum Codes {
    /// Closed enumeration; codes outside it are dropped.
    Table(CodeTable),
    /// The code itself is the value, unless it is a placeholder.
    Verbatim { placeholders: &'static [&'static str] },
}

/// A feature stored at `offset..offset + width` of the tag.
#[derive(Debug)]
pub struct Slot {
    pub feature: Feature,
    pub offset: usize,
    pub width: usize,
    pub codes: Codes,
}

impl Slot {
    const fn at(feature: Feature, offset: usize, table: CodeTable) -> Self {
        Self { feature, offset, width: 1, codes: Codes::Table(table) }
    }

    /// Reads the slot; `None` when the tag is too short or the code is unknown.
    pub fn read(&self, tag: &str) -> Option<Cow<'static, str>> {
        let code = tag.get(self.offset..self.offset + self.width)?;
        match &self.codes {
            Codes::Table(entries) => entries
                .iter()
                .find(|(key, _)| *key == code)
                .map(|(_, value)| Cow::Borrowed(*value)),
            Codes::Verbatim { placeholders } => {
                if placeholders.contains(&code) {
                    None
                } else {
                    Some(Cow::Owned(code.to_string()))
                }
            }
        }
    }
}

pub static CLAUSE_SLOTS: &[Slot] = &[
    Slot { feature: Feature::ClauseType, offset: 2, width: 2, codes: Codes::Table(CLAUSE_TYPE) },
    Slot::at(Feature::IllocutionaryForce, 4, ILLOCUTIONARY_FORCE),
];

pub static PHRASE_SLOTS: &[Slot] = &[Slot::at(Feature::SemanticRole, 3, SEMANTIC_ROLE)];

const NOUN_LIST_INDEX: Slot = Slot {
    feature: Feature::NounListIndex,
    offset: 4,
    width: 1,
    codes: Codes::Verbatim { placeholders: &[".", "N"] },
};

/// Compact noun layout: Number directly after the part code.
pub static NOUN_SLOTS: &[Slot] = &[
    Slot::at(Feature::Number, 2, NUMBER),
    NOUN_LIST_INDEX,
    Slot::at(Feature::ParticipantTracking, 5, PARTICIPANT_TRACKING),
    Slot::at(Feature::Person, 10, PERSON),
];

/// Exported corpus layout, `N-1A1SDAnK3NN........`: a numeric header at
/// offset 2 pushes Number to 5 and Participant Tracking to 6.
pub static INDEXED_NOUN_SLOTS: &[Slot] = &[
    NOUN_LIST_INDEX,
    Slot::at(Feature::Number, 5, NUMBER),
    Slot::at(Feature::ParticipantTracking, 6, PARTICIPANT_TRACKING),
    Slot::at(Feature::Person, 10, PERSON),
];

pub static VERB_SLOTS: &[Slot] = &[
    Slot::at(Feature::Aspect, 4, ASPECT),
    Slot::at(Feature::Mood, 5, MOOD),
    Slot::at(Feature::Polarity, 6, POLARITY),
];

pub static ADJECTIVE_SLOTS: &[Slot] = &[Slot::at(Feature::Degree, 3, DEGREE)];

/// Decoded features of one tag, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Features(BTreeMap<Feature, Cow<'static, str>>);

impl Features {
    pub fn get(&self, feature: Feature) -> Option<&str> {
        self.0.get(&feature).map(|v| v.as_ref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, &str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, v.as_ref()))
    }

    /// Features whose value is not a placeholder such as `Not Applicable`.
    pub fn meaningful(&self) -> impl Iterator<Item = (Feature, &str)> + '_ {
        self.iter().filter(|(_, v)| !NULLISH.contains(v))
    }

    fn insert(&mut self, feature: Feature, value: Cow<'static, str>) {
        self.0.insert(feature, value);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedTag {
    pub part: Option<Part>,
    pub features: Features,
}

/// Part label for a tag, from its first character alone.
pub fn part_of(tag: &str) -> Option<Part> {
    let first = tag.chars().next()?;
    PARTS.iter().find(|(code, _)| *code == first).map(|(_, part)| *part)
}

fn is_indexed_noun(tag: &str) -> bool {
    tag.as_bytes().get(2).is_some_and(u8::is_ascii_digit)
}

/// The slot table that applies to `tag`.
pub fn slots_for(tag: &str) -> &'static [Slot] {
    match part_of(tag) {
        Some(Part::Clause) => CLAUSE_SLOTS,
        Some(Part::Noun) if is_indexed_noun(tag) => INDEXED_NOUN_SLOTS,
        Some(Part::Noun) => NOUN_SLOTS,
        Some(Part::Verb) => VERB_SLOTS,
        Some(Part::Adjective) => ADJECTIVE_SLOTS,
        Some(part) if part.is_phrase_level() => PHRASE_SLOTS,
        Some(_) => &[],
        // Unlisted lowercase labels are still phrases
        None if tag.starts_with(|c: char| c.is_lowercase()) => PHRASE_SLOTS,
        None => &[],
    }
}

/// Decodes the part label and every positional feature of a tag.
///
/// Short tags and unknown codes simply leave features out.
pub fn decode(tag: &str) -> DecodedTag {
    let mut features = Features::default();
    for slot in slots_for(tag) {
        if let Some(value) = slot.read(tag) {
            features.insert(slot.feature, value);
        }
    }

    DecodedTag { part: part_of(tag), features }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_codes_keep_case() {
        assert_eq!(part_of("N-1"), Some(Part::Noun));
        assert_eq!(part_of("n-1"), Some(Part::NounPhrase));
        assert_eq!(part_of("V-1"), Some(Part::Verb));
        assert_eq!(part_of("v-1"), Some(Part::VerbPhrase));
        assert_eq!(part_of("A-1"), Some(Part::Adjective));
        assert_eq!(part_of("a-1"), Some(Part::AdverbPhrase));
        assert_eq!(part_of("c-IDp"), Some(Part::Clause));
        assert_eq!(part_of("C-1"), Some(Part::Conjunction));
        assert_eq!(part_of("X-1"), Some(Part::Particle));
        assert_eq!(part_of("R-1"), Some(Part::Particle));
        assert_eq!(part_of("."), Some(Part::Period));
        assert_eq!(part_of("Z-1"), None);
        assert_eq!(part_of(""), None);
    }

    #[test]
    fn test_indexed_noun() {
        let decoded = decode("N-1A1SDAnK3NN........");
        assert_eq!(decoded.part, Some(Part::Noun));
        assert_eq!(decoded.features.get(Feature::Number), Some("Singular"));
        assert_eq!(decoded.features.get(Feature::ParticipantTracking), Some("Routine"));
        assert_eq!(decoded.features.get(Feature::Person), Some("Third"));
        assert_eq!(decoded.features.get(Feature::NounListIndex), Some("1"));
    }

    #[test]
    fn test_compact_noun() {
        let decoded = decode("N-P.NI....2");
        assert_eq!(decoded.features.get(Feature::Number), Some("Plural"));
        assert_eq!(decoded.features.get(Feature::NounListIndex), None);
        assert_eq!(decoded.features.get(Feature::ParticipantTracking), Some("First Mention"));
        assert_eq!(decoded.features.get(Feature::Person), Some("Second"));
    }

    #[test]
    fn test_short_verb_has_no_aspect() {
        for tag in ["V", "V-", "V-1", "V-1A"] {
            let decoded = decode(tag);
            assert_eq!(decoded.part, Some(Part::Verb));
            assert_eq!(decoded.features.get(Feature::Aspect), None, "{}", tag);
            assert!(decoded.features.is_empty());
        }
    }

    #[test]
    fn test_verb() {
        let decoded = decode("V-1AIINAN...........");
        assert_eq!(decoded.features.get(Feature::Aspect), Some("Imperfective"));
        assert_eq!(decoded.features.get(Feature::Mood), Some("Indicative"));
        assert_eq!(decoded.features.get(Feature::Polarity), Some("Negative"));

        // Unknown mood code is dropped without touching the others
        let decoded = decode("V-1ArUINAN...........");
        assert_eq!(decoded.features.get(Feature::Aspect), Some("Inceptive"));
        assert_eq!(decoded.features.get(Feature::Mood), None);
        assert_eq!(decoded.features.get(Feature::Polarity), None);
    }

    #[test]
    fn test_adjective_degree() {
        assert_eq!(decode("A-1C").features.get(Feature::Degree), Some("Comparative"));
        assert_eq!(decode("A-1").features.get(Feature::Degree), None);
        assert_eq!(decode("A-1z").features.get(Feature::Degree), None);
    }

    #[test]
    fn test_clause() {
        let decoded = decode("c-IDp.......");
        assert_eq!(decoded.part, Some(Part::Clause));
        assert_eq!(decoded.features.get(Feature::ClauseType), Some("Independent"));
        assert_eq!(decoded.features.get(Feature::IllocutionaryForce), Some("Declarative"));

        let decoded = decode("c-XXq");
        assert_eq!(decoded.features.get(Feature::ClauseType), None);
        assert_eq!(decoded.features.get(Feature::IllocutionaryForce), Some("Interrogative"));

        assert!(decode("c-I").features.is_empty());
    }

    #[test]
    fn test_phrase_role() {
        let decoded = decode("n-1A.....");
        assert_eq!(decoded.part, Some(Part::NounPhrase));
        assert_eq!(decoded.features.get(Feature::SemanticRole), Some("Most Agent-like"));

        // Unlisted phrase label still reads the role slot
        let decoded = decode("p-1P");
        assert_eq!(decoded.part, None);
        assert_eq!(decoded.features.get(Feature::SemanticRole), Some("Most Patient-like"));
    }

    #[test]
    fn test_meaningful_skips_placeholders() {
        let decoded = decode("v-1N");
        assert_eq!(decoded.features.get(Feature::SemanticRole), Some("Not Applicable"));
        assert_eq!(decoded.features.meaningful().count(), 0);
    }

    #[test]
    fn test_non_ascii_tag_does_not_panic() {
        let decoded = decode("Nλ–SDé");
        assert_eq!(decoded.part, Some(Part::Noun));
        assert_eq!(decoded.features.get(Feature::Number), None);
    }

    #[test]
    fn test_words_without_positional_features() {
        for tag in ["P-1A.......", "C-1A.......", "D-1A......."] {
            let decoded = decode(tag);
            assert!(decoded.part.is_some());
            assert!(decoded.features.is_empty(), "{}", tag);
        }
    }
}
