use nom::{
    bytes::complete::{tag, take_till, take_until},
    sequence::{pair, preceded},
    IResult,
};
use tracing::trace;

use crate::token::{Span, Token};

pub const WORD_MARKER: &str = "~\\wd";
pub const TAG_MARKER: &str = "~\\tg";
pub const UNIT_MARKER: &str = "~\\lu";

/// Splits a segment at its lexical-unit marker: `(after_marker, before_marker)`.
fn unit(segment: &str) -> IResult<&str, &str> {
    let (rest, head) = take_until(UNIT_MARKER)(segment)?;
    let (rest, _) = tag(UNIT_MARKER)(rest)?;
    Ok((rest, head))
}

/// Skips to the tag marker; the remaining input is the tag text.
fn tag_text(head: &str) -> IResult<&str, (&str, &str)> {
    pair(take_until(TAG_MARKER), tag(TAG_MARKER))(head)
}

/// Constituent text runs up to the next marker or the end of the segment.
fn constituent_text(rest: &str) -> IResult<&str, &str> {
    preceded(take_till(|c: char| !c.is_whitespace()), take_till(|c: char| c == '~'))(rest)
}

fn scan_segment(segment: &str) -> Option<(&str, &str)> {
    let (after_unit, head) = unit(segment).ok()?;

    let tag = match tag_text(head) {
        Ok((text, _)) => text.trim(),
        Err(_) => "",
    };
    let constituent = match constituent_text(after_unit) {
        Ok((_, text)) => text.trim(),
        Err(_) => "",
    };

    if tag.is_empty() && constituent.is_empty() {
        return None;
    }
    Some((tag, constituent))
}

/// Splits a raw AnalyzedVerse string into (tag, constituent) tokens in
/// document order.
///
/// Segments without a lexical unit, or with neither a tag nor a constituent,
/// are padding and are skipped. Empty input yields no tokens.
pub fn tokenize(raw: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    if raw.trim().is_empty() {
        return tokens;
    }

    for segment in raw.split(WORD_MARKER) {
        // Segments are subslices of `raw`, so the pointer offset is the span start
        let start = segment.as_ptr() as usize - raw.as_ptr() as usize;

        match scan_segment(segment) {
            Some((tag, constituent)) => tokens.push(Token {
                span: Span::new(start, start + segment.len()),
                tag,
                constituent,
            }),
            None => {
                if !segment.trim().is_empty() {
                    trace!(start, segment, "skipping segment without tag or lexical unit");
                }
            }
        }
    }

    tokens
}
