use serde::Serialize;
use tbta_protocol::PartOfSpeech;

use crate::constituent::split;
use crate::parser::tokenize;
use crate::syntax::{build_tree, Node};
use crate::tags::part_of;

/// A lexical item ready for concept lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedWord {
    pub part_of_speech: Option<PartOfSpeech>,
    /// First character of the tag.
    pub category: char,
    /// Surface form as written in the constituent.
    pub content: String,
    /// Lowercased surface form.
    pub stem: String,
    pub sense: Option<char>,
    /// Tag text after the first `-`.
    pub feature_codes: Option<String>,
}

fn feature_codes(tag: &str) -> Option<String> {
    tag.split_once('-')
        .map(|(_, codes)| codes)
        .filter(|codes| !codes.is_empty())
        .map(str::to_string)
}

fn is_word_tag(tag: &str) -> bool {
    tag.starts_with(|c: char| c.is_ascii_uppercase())
}

/// Decoded words of every word leaf in `nodes`, in document order.
pub fn words_from_tree(nodes: &[Node]) -> Vec<DecodedWord> {
    let mut words = Vec::new();

    for node in Node::words_in(nodes) {
        if !is_word_tag(&node.code) {
            continue;
        }
        let Some(constituent) = node.constituent() else {
            continue;
        };
        let Some(category) = node.code.chars().next() else {
            continue;
        };
        let part_of_speech = part_of(&node.code).and_then(|part| part.part_of_speech());
        let codes = feature_codes(&node.code);

        for item in split(constituent) {
            words.push(DecodedWord {
                part_of_speech,
                category,
                content: item.stem.to_string(),
                stem: item.stem.to_lowercase(),
                sense: item.sense,
                feature_codes: codes.clone(),
            });
        }
    }

    words
}

/// Tokenizes, builds the tree and extracts its words in one pass.
pub fn decode_words(raw: &str) -> Vec<DecodedWord> {
    words_from_tree(&build_tree(&tokenize(raw)))
}
