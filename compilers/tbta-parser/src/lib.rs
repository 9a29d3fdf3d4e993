pub mod constituent;
pub mod parser;
pub mod syntax;
pub mod tags;
pub mod token;
pub mod words;

use serde::Serialize;

pub use crate::parser::tokenize;
pub use crate::syntax::{build_tree, find_feature, FeatureHit, Node, NodeKind};
pub use crate::tags::{decode, DecodedTag, Features};
pub use crate::token::{Span, Token};
pub use crate::words::{decode_words, words_from_tree, DecodedWord};

/// Primary entry point: AnalyzedVerse -> tree.
pub fn decode_verse(raw: &str) -> Vec<Node> {
    build_tree(&tokenize(raw))
}

/// Tree and words of one verse, decoded from a single token pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerseAnalysis {
    pub structure: Vec<Node>,
    pub words: Vec<DecodedWord>,
}

pub fn analyze(raw: &str) -> VerseAnalysis {
    let structure = decode_verse(raw);
    let words = words_from_tree(&structure);
    VerseAnalysis { structure, words }
}
