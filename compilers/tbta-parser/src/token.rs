/// Byte range of a token's segment in the raw AnalyzedVerse string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// One `~\wd` unit of an AnalyzedVerse: the feature tag and the literal
/// constituent attached to it. Both are trimmed slices of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub span: Span,
    pub tag: &'a str,
    pub constituent: &'a str,
}

impl<'a> Token<'a> {
    pub fn first_tag_char(&self) -> Option<char> {
        self.tag.chars().next()
    }
}
