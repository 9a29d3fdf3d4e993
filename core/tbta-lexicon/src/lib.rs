pub mod coverage;
pub mod index;
pub mod load;
pub mod resolver;

pub use coverage::{annotate, Coverage, ResolvedWord};
pub use index::{ConceptIndex, ConceptStore};
pub use load::{compile_lexicon, lexicon_from_archive, lexicon_from_json, load_lexicon, LexiconError};
pub use resolver::{Match, MatchTier, Resolver};
