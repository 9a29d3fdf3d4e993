use core::fmt;
use core::str::FromStr;

/// A verse address: USFM book code, chapter and verse.
///
/// Parses `GEN 1:1`, `GEN.1.1`, `GEN.001.001` and `GEN-001-001`; displays as
/// `GEN.001.001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VerseRef {
    book: [u8; 3],
    pub chapter: u16,
    pub verse: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// Book code is not three ASCII letters/digits.
    InvalidBook,
    /// Expected book, chapter and verse.
    WrongShape(usize),
    InvalidNumber,
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceError::InvalidBook => write!(f, "book code must be three letters or digits"),
            ReferenceError::WrongShape(n) => {
                write!(f, "expected BOOK CHAPTER VERSE, found {} part(s)", n)
            }
            ReferenceError::InvalidNumber => write!(f, "chapter and verse must be positive numbers"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReferenceError {}

impl VerseRef {
    pub fn new(book: &str, chapter: u16, verse: u16) -> Result<Self, ReferenceError> {
        let bytes = book.trim().as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphanumeric) {
            return Err(ReferenceError::InvalidBook);
        }
        if chapter == 0 || verse == 0 {
            return Err(ReferenceError::InvalidNumber);
        }

        let mut code = [0u8; 3];
        for (slot, b) in code.iter_mut().zip(bytes) {
            *slot = b.to_ascii_uppercase();
        }
        Ok(Self { book: code, chapter, verse })
    }

    pub fn book(&self) -> &str {
        // Only ASCII alphanumerics are ever stored.
        core::str::from_utf8(&self.book).unwrap_or("???")
    }
}

impl FromStr for VerseRef {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s
            .trim()
            .split(|c: char| c == ' ' || c == '.' || c == ':' || c == '-')
            .filter(|p| !p.is_empty());

        let (book, chapter, verse) = match (parts.next(), parts.next(), parts.next()) {
            (Some(b), Some(c), Some(v)) => (b, c, v),
            (b, c, _) => {
                let found = [b, c].iter().filter(|p| p.is_some()).count();
                return Err(ReferenceError::WrongShape(found));
            }
        };
        let extra = parts.count();
        if extra > 0 {
            return Err(ReferenceError::WrongShape(3 + extra));
        }

        let chapter = chapter.parse().map_err(|_| ReferenceError::InvalidNumber)?;
        let verse = verse.parse().map_err(|_| ReferenceError::InvalidNumber)?;
        VerseRef::new(book, chapter, verse)
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}.{:03}", self.book(), self.chapter, self.verse)
    }
}
