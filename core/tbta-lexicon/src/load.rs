use std::fs;
use std::path::{Path, PathBuf};

use rkyv::ser::{serializers::AllocSerializer, Serializer};
use rkyv::{AlignedVec, Deserialize, Infallible};
use tbta_protocol::Lexicon;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("lexicon not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lexicon JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid lexicon archive: {0}")]
    Archive(String),
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Parses a JSON lexicon document.
pub fn lexicon_from_json(text: &str) -> Result<Lexicon, LexiconError> {
    Ok(serde_json::from_str(text)?)
}

/// Validates an rkyv lexicon archive and deserializes it.
pub fn lexicon_from_archive(bytes: &[u8]) -> Result<Lexicon, LexiconError> {
    // Archives need their root aligned; file buffers are not
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);

    let archived = rkyv::check_archived_root::<Lexicon>(&aligned)
        .map_err(|e| LexiconError::Archive(e.to_string()))?;
    let lexicon: Lexicon = archived
        .deserialize(&mut Infallible)
        .map_err(|_| LexiconError::Archive("deserialization failed".to_string()))?;
    Ok(lexicon)
}

/// Loads a lexicon from `.json`, or from a compiled archive for any other
/// extension.
pub fn load_lexicon(path: impl AsRef<Path>) -> Result<Lexicon, LexiconError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LexiconError::NotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let lexicon = if is_json(path) {
        let text = std::str::from_utf8(&bytes)
            .map_err(|e| LexiconError::Archive(format!("lexicon is not UTF-8: {}", e)))?;
        lexicon_from_json(text)?
    } else {
        lexicon_from_archive(&bytes)?
    };

    info!(
        path = %path.display(),
        version = lexicon.version,
        concepts = lexicon.concepts.len(),
        "loaded lexicon"
    );
    Ok(lexicon)
}

/// Serializes a lexicon to its rkyv archive.
pub fn compile_lexicon(lexicon: &Lexicon) -> Result<AlignedVec, LexiconError> {
    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(lexicon)
        .map_err(|e| LexiconError::Archive(format!("{:?}", e)))?;
    Ok(serializer.into_serializer().into_inner())
}
