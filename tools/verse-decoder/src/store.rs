use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;
use tbta_protocol::{ReferenceError, VerseRef};

/// One line of the JSONL verse store.
#[derive(Debug, Clone, Deserialize)]
pub struct VerseRecord {
    pub book: String,
    pub chapter: u16,
    pub verse: u16,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub analyzed_verse: String,
}

impl VerseRecord {
    pub fn parse(line: &str) -> Result<Self> {
        serde_json::from_str(line).context("malformed verse record")
    }

    pub fn reference(&self) -> Result<VerseRef> {
        VerseRef::new(&self.book, self.chapter, self.verse)
            .with_context(|| format!("bad reference {} {}:{}", self.book, self.chapter, self.verse))
    }
}

/// Which verses of the store a batch run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Book(VerseRef),
    Verse(VerseRef),
}

impl Selection {
    pub fn contains(&self, reference: &VerseRef) -> bool {
        match self {
            Selection::All => true,
            Selection::Book(book) => book.book() == reference.book(),
            Selection::Verse(verse) => verse == reference,
        }
    }
}

impl FromStr for Selection {
    type Err = ReferenceError;

    /// `GEN` selects a book, `GEN 1:1` (or any verse form) a single verse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() == 3 && !s.contains([' ', '.', ':', '-']) {
            return VerseRef::new(s, 1, 1).map(Selection::Book);
        }
        s.parse().map(Selection::Verse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults() {
        let record = VerseRecord::parse(r#"{"book":"GEN","chapter":1,"verse":1}"#).unwrap();
        assert_eq!(record.text, "");
        assert_eq!(record.analyzed_verse, "");
        assert_eq!(record.reference().unwrap().to_string(), "GEN.001.001");
    }

    #[test]
    fn test_malformed_record() {
        assert!(VerseRecord::parse("{\"book\":").is_err());
        assert!(VerseRecord::parse(r#"{"book":"GEN","chapter":-1,"verse":1}"#).is_err());

        let record = VerseRecord::parse(r#"{"book":"GENESIS","chapter":1,"verse":1}"#).unwrap();
        assert!(record.reference().is_err());
    }

    #[test]
    fn test_selection() {
        let gen_1_1: VerseRef = "GEN 1:1".parse().unwrap();
        let gen_2_4: VerseRef = "GEN 2:4".parse().unwrap();
        let exo_1_1: VerseRef = "EXO 1:1".parse().unwrap();

        let book: Selection = "gen".parse().unwrap();
        assert!(book.contains(&gen_2_4));
        assert!(!book.contains(&exo_1_1));

        let verse: Selection = "GEN.001.001".parse().unwrap();
        assert_eq!(verse, Selection::Verse(gen_1_1));
        assert!(!verse.contains(&gen_2_4));

        assert!(Selection::All.contains(&exo_1_1));
        assert!("GENESIS".parse::<Selection>().is_err());
    }
}
