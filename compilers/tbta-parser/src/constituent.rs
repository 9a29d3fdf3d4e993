/// Constituents that mark structure rather than words.
pub const FILLERS: &[&str] = &["{", "}", "(", ")", "[", "]", "|", ".", ",", ";", ":", "!", "?", "-"];

/// One lexical item of a constituent. `stem` keeps its surface casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordItem<'a> {
    pub stem: &'a str,
    pub sense: Option<char>,
}

impl<'a> WordItem<'a> {
    fn plain(stem: &'a str) -> Self {
        Self { stem, sense: None }
    }

    /// `Acreate` carries sense `A` on stem `create`.
    fn sensed(segment: &'a str) -> Self {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_ascii_uppercase() && segment.len() > 1 => Self {
                stem: chars.as_str(),
                sense: Some(first),
            },
            _ => Self::plain(segment),
        }
    }
}

/// Trims a constituent and rejects structural filler.
///
/// Trailing parentheses glued to a word are stripped; markers such as
/// `-Begin Scene` are filler.
pub fn clean(constituent: &str) -> Option<&str> {
    let word = constituent.trim().trim_end_matches(|c: char| c == '(' || c == ')');
    if word.is_empty() || FILLERS.contains(&word) || word.starts_with('-') {
        return None;
    }
    Some(word)
}

/// Expands a constituent into its word items.
///
/// `make/Acreate` lists alternates: the first segment never carries a sense,
/// later ones may be prefixed by a single uppercase sense letter.
pub fn split(constituent: &str) -> Vec<WordItem<'_>> {
    let Some(word) = clean(constituent) else {
        return Vec::new();
    };

    if !word.contains('/') {
        return vec![WordItem::plain(word)];
    }

    word.split('/')
        .enumerate()
        .map(|(i, segment)| {
            if i == 0 {
                WordItem::plain(segment)
            } else {
                WordItem::sensed(segment)
            }
        })
        .filter(|item| !item.stem.is_empty())
        .collect()
}
