use core::fmt;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Word-level part of speech, as used by the concept lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum PartOfSpeech {
    Noun = 0,
    Verb = 1,
    Adjective = 2,
    Adverb = 3,
    Adposition = 4,
    Conjunction = 5,
    Particle = 6,
    /// Multi-word lexicon entries. Never produced by a tag.
    Phrasal = 7,
}

impl PartOfSpeech {
    pub const fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "Noun",
            PartOfSpeech::Verb => "Verb",
            PartOfSpeech::Adjective => "Adjective",
            PartOfSpeech::Adverb => "Adverb",
            PartOfSpeech::Adposition => "Adposition",
            PartOfSpeech::Conjunction => "Conjunction",
            PartOfSpeech::Particle => "Particle",
            PartOfSpeech::Phrasal => "Phrasal",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded label of a tree node.
///
/// Word-level labels come from an uppercase first tag character, phrase-level
/// labels (and `Clause`) from a lowercase one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum Part {
    Clause,
    #[cfg_attr(feature = "serde", serde(rename = "NP"))]
    NounPhrase,
    #[cfg_attr(feature = "serde", serde(rename = "VP"))]
    VerbPhrase,
    #[cfg_attr(feature = "serde", serde(rename = "AdjP"))]
    AdjectivePhrase,
    #[cfg_attr(feature = "serde", serde(rename = "AdvP"))]
    AdverbPhrase,
    Noun,
    Verb,
    Adjective,
    Adverb,
    Adposition,
    Conjunction,
    Particle,
    Period,
}

impl Part {
    pub const fn label(self) -> &'static str {
        match self {
            Part::Clause => "Clause",
            Part::NounPhrase => "NP",
            Part::VerbPhrase => "VP",
            Part::AdjectivePhrase => "AdjP",
            Part::AdverbPhrase => "AdvP",
            Part::Noun => "Noun",
            Part::Verb => "Verb",
            Part::Adjective => "Adjective",
            Part::Adverb => "Adverb",
            Part::Adposition => "Adposition",
            Part::Conjunction => "Conjunction",
            Part::Particle => "Particle",
            Part::Period => "Period",
        }
    }

    /// The lexicon part of speech for word-level labels.
    pub const fn part_of_speech(self) -> Option<PartOfSpeech> {
        match self {
            Part::Noun => Some(PartOfSpeech::Noun),
            Part::Verb => Some(PartOfSpeech::Verb),
            Part::Adjective => Some(PartOfSpeech::Adjective),
            Part::Adverb => Some(PartOfSpeech::Adverb),
            Part::Adposition => Some(PartOfSpeech::Adposition),
            Part::Conjunction => Some(PartOfSpeech::Conjunction),
            Part::Particle => Some(PartOfSpeech::Particle),
            _ => None,
        }
    }

    pub const fn is_phrase_level(self) -> bool {
        matches!(
            self,
            Part::NounPhrase | Part::VerbPhrase | Part::AdjectivePhrase | Part::AdverbPhrase
        )
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A grammatical field read from a fixed position of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum Feature {
    // Clause
    #[cfg_attr(feature = "serde", serde(rename = "Clause Type"))]
    ClauseType,
    #[cfg_attr(feature = "serde", serde(rename = "Illocutionary Force"))]
    IllocutionaryForce,

    // Phrase
    #[cfg_attr(feature = "serde", serde(rename = "Semantic Role"))]
    SemanticRole,

    // Noun
    Number,
    #[cfg_attr(feature = "serde", serde(rename = "Noun List Index"))]
    NounListIndex,
    #[cfg_attr(feature = "serde", serde(rename = "Participant Tracking"))]
    ParticipantTracking,
    Person,

    // Verb
    Aspect,
    Mood,
    Polarity,

    // Adjective
    Degree,
}

impl Feature {
    pub const ALL: [Feature; 11] = [
        Feature::ClauseType,
        Feature::IllocutionaryForce,
        Feature::SemanticRole,
        Feature::Number,
        Feature::NounListIndex,
        Feature::ParticipantTracking,
        Feature::Person,
        Feature::Aspect,
        Feature::Mood,
        Feature::Polarity,
        Feature::Degree,
    ];

    /// Looks a feature up by its display name, ignoring case.
    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.name().eq_ignore_ascii_case(name.trim()))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Feature::ClauseType => "Clause Type",
            Feature::IllocutionaryForce => "Illocutionary Force",
            Feature::SemanticRole => "Semantic Role",
            Feature::Number => "Number",
            Feature::NounListIndex => "Noun List Index",
            Feature::ParticipantTracking => "Participant Tracking",
            Feature::Person => "Person",
            Feature::Aspect => "Aspect",
            Feature::Mood => "Mood",
            Feature::Polarity => "Polarity",
            Feature::Degree => "Degree",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
