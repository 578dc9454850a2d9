//! Standard transform definitions
//!
//! Pre-built pipelines as `once_cell::sync::Lazy` statics. The strict variant refuses decks
//! whose structural pass recorded an error; the others always produce a result.

use super::stages::{Classify, RejectErrors, StructuralParse, Tokenize};
use super::Transform;
use crate::svrf::ast::ParseResult;
use crate::svrf::parsing::StructuralOutput;
use crate::svrf::token::Token;
use once_cell::sync::Lazy;

pub type TokenizationTransform = Transform<String, Vec<Token>>;
pub type StructureTransform = Transform<String, StructuralOutput>;
pub type ResultTransform = Transform<String, ParseResult>;

/// Source text to tokens
pub static TOKENIZATION: Lazy<TokenizationTransform> =
    Lazy::new(|| Transform::source().then(Tokenize));

/// Source text to layers and unclassified rule blocks
pub static STRUCTURE: Lazy<StructureTransform> =
    Lazy::new(|| Transform::source().then(Tokenize).then(StructuralParse));

/// Source text to a classified result, the standard full pipeline
pub static STRING_TO_RESULT: Lazy<ResultTransform> = Lazy::new(|| {
    Transform::source()
        .then(Tokenize)
        .then(StructuralParse)
        .then(Classify::standard())
});

/// Like [`STRING_TO_RESULT`], but fails when the deck has error diagnostics
pub static STRICT_STRING_TO_RESULT: Lazy<ResultTransform> = Lazy::new(|| {
    Transform::source()
        .then(Tokenize)
        .then(StructuralParse)
        .then(RejectErrors)
        .then(Classify::standard())
});
