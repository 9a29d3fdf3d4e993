#![no_std] // Shared by the parser, the lexicon and the tools

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod morphology;
pub mod reference;

// Re-export core types for convenience
pub use ids::ConceptId;
pub use morphology::*;
pub use reference::{ReferenceError, VerseRef};

pub mod model;
pub use model::*;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use rkyv::{from_bytes, to_bytes};

    fn concept(id: u32, stem: &str, sense: Option<char>, pos: PartOfSpeech) -> Concept {
        Concept {
            id: ConceptId(id),
            stem: stem.to_string(),
            sense,
            part_of_speech: pos,
            gloss: "".to_string(),
            brief_gloss: None,
            level: Some(1),
            categorization: None,
        }
    }

    #[test]
    fn test_enum_serialization() {
        let original = PartOfSpeech::Adposition;

        let bytes = to_bytes::<_, 256>(&original).expect("Failed to serialize PartOfSpeech");
        let deserialized: PartOfSpeech =
            from_bytes(&bytes).expect("Failed to deserialize PartOfSpeech");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_lexicon_keeps_stored_order() {
        let original = Lexicon {
            version: 3,
            concepts: vec![
                concept(7, "love", Some('A'), PartOfSpeech::Noun),
                concept(7, "love", None, PartOfSpeech::Verb),
                concept(12, "God", None, PartOfSpeech::Noun),
            ],
        };

        let bytes = to_bytes::<_, 1024>(&original).expect("Failed to serialize Lexicon");
        let deserialized: Lexicon = from_bytes(&bytes).expect("Failed to deserialize Lexicon");

        assert_eq!(original, deserialized);
        assert_eq!(deserialized.concepts[1].part_of_speech, PartOfSpeech::Verb);
    }

    #[test]
    fn test_id_layout() {
        assert_eq!(core::mem::size_of::<ConceptId>(), 4);
    }

    #[test]
    fn test_part_labels() {
        assert_eq!(Part::NounPhrase.label(), "NP");
        assert_eq!(Part::Noun.part_of_speech(), Some(PartOfSpeech::Noun));
        assert_eq!(Part::Clause.part_of_speech(), None);
        assert!(Part::AdverbPhrase.is_phrase_level());
        assert!(!Part::Clause.is_phrase_level());
    }

    #[test]
    fn test_feature_names() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_name(feature.name()), Some(feature));
        }
        assert_eq!(Feature::from_name("participant tracking"), Some(Feature::ParticipantTracking));
        assert_eq!(Feature::from_name("Tense"), None);
    }

    #[test]
    fn test_verse_ref_forms() {
        let expected = VerseRef::new("GEN", 1, 1).unwrap();
        for form in ["GEN 1:1", "GEN.1.1", "GEN.001.001", "GEN-001-001", "gen 1:1"] {
            assert_eq!(form.parse::<VerseRef>(), Ok(expected), "{}", form);
        }
        assert_eq!(expected.to_string(), "GEN.001.001");
        assert_eq!("1JN 4:8".parse::<VerseRef>().unwrap().book(), "1JN");
    }

    #[test]
    fn test_verse_ref_errors() {
        assert_eq!("GEN 1".parse::<VerseRef>(), Err(ReferenceError::WrongShape(2)));
        assert_eq!("GENESIS 1:1".parse::<VerseRef>(), Err(ReferenceError::InvalidBook));
        assert_eq!("GEN x:1".parse::<VerseRef>(), Err(ReferenceError::InvalidNumber));
        assert_eq!("GEN 0:1".parse::<VerseRef>(), Err(ReferenceError::InvalidNumber));
        assert_eq!("GEN 1:1:2".parse::<VerseRef>(), Err(ReferenceError::WrongShape(4)));
    }
}
