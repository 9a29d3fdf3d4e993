use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Identifier of an entry in the concept lexicon.
///
/// Ontology ids are not unique across senses of the same stem, so this is a
/// label for a concept rather than a key into the lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[archive(check_bytes)]
#[repr(transparent)] // Same layout as u32
pub struct ConceptId(pub u32);

impl ConceptId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl From<u32> for ConceptId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<ConceptId> for u32 {
    fn from(id: ConceptId) -> u32 {
        id.0
    }
}

impl core::fmt::Display for ConceptId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
