use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::ConceptId;
use crate::morphology::PartOfSpeech;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One word-sense of the ontology.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Concept {
    pub id: ConceptId,
    pub stem: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sense: Option<char>,
    pub part_of_speech: PartOfSpeech,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gloss: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub brief_gloss: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub level: Option<u8>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub categorization: Option<String>,
}

/// The concept lexicon. The order of `concepts` is the stored order used to
/// break ties between homographs.
#[derive(Debug, Clone, Default, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    pub concepts: Vec<Concept>,
}
