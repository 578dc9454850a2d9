//! Source loading
//!
//! `SourceLoader` reads rule-deck text once, from a file or a string, and runs transforms
//! over it. This is the only place the parser touches the filesystem.
//!
//! ```rust,ignore
//! use svrf_parser::SourceLoader;
//!
//! let result = SourceLoader::from_path("rules.svrf")?.parse()?;
//! let tokens = SourceLoader::from_string("LAYER M1 31\n").tokenize()?;
//! ```

use super::ast::ParseResult;
use super::parsing::StructuralOutput;
use super::token::Token;
use super::transforms::standard::{
    STRICT_STRING_TO_RESULT, STRING_TO_RESULT, STRUCTURE, TOKENIZATION,
};
use super::transforms::{Transform, TransformError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Transform(#[from] TransformError),
}

pub struct SourceLoader {
    source: String,
    path: Option<PathBuf>,
}

impl SourceLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded {} ({} bytes)", path.display(), source.len());
        Ok(SourceLoader {
            source,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        SourceLoader {
            source: source.into(),
            path: None,
        }
    }

    /// Run any transform that starts from source text
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> Result<O, LoaderError> {
        Ok(transform.run(self.source.clone())?)
    }

    /// Tokenize, parse and classify. Shortcut for `.with(&STRING_TO_RESULT)`.
    pub fn parse(&self) -> Result<ParseResult, LoaderError> {
        self.with(&STRING_TO_RESULT)
    }

    /// Like [`parse`](Self::parse), but a deck with error diagnostics is an error
    pub fn parse_strict(&self) -> Result<ParseResult, LoaderError> {
        self.with(&STRICT_STRING_TO_RESULT)
    }

    /// Structural pass only
    pub fn structure(&self) -> Result<StructuralOutput, LoaderError> {
        self.with(&STRUCTURE)
    }

    pub fn tokenize(&self) -> Result<Vec<Token>, LoaderError> {
        self.with(&TOKENIZATION)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Path the source was read from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_string() {
        let loader = SourceLoader::from_string("LAYER M1 31\n");
        assert_eq!(loader.source(), "LAYER M1 31\n");
        assert!(loader.path().is_none());
        assert_eq!(loader.parse().unwrap().layers.len(), 1);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "W {{ INTERNAL1 M1 < 0.1 }}").unwrap();
        let loader = SourceLoader::from_path(file.path()).unwrap();
        assert_eq!(loader.path(), Some(file.path()));
        assert_eq!(loader.parse().unwrap().rules.len(), 1);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = SourceLoader::from_path("/nonexistent/deck.svrf")
            .err()
            .unwrap();
        assert!(matches!(err, LoaderError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/deck.svrf"));
    }

    #[test]
    fn test_parse_strict_rejects_broken_deck() {
        let loader = SourceLoader::from_string("LAYER M1 31\nLAYER M2 x\n");
        assert_eq!(loader.parse().unwrap().layers.len(), 1);
        let err = loader.parse_strict().unwrap_err();
        assert!(matches!(err, LoaderError::Transform(_)));
        assert!(err.to_string().contains("layer-syntax"));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_structure_and_tokens() {
        let loader = SourceLoader::from_string("R { AREA M1 < 1 }");
        assert_eq!(loader.structure().unwrap().blocks.len(), 1);
        assert!(!loader.tokenize().unwrap().is_empty());
    }
}
