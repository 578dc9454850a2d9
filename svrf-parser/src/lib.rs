//! # svrf-parser
//!
//! Parsing and rule classification for SVRF design-rule decks.
//!
//! File Layout
//!
//! The pipeline runs strictly left to right, and each stage lives in its own module:
//!
//! src/svrf
//!   ├── token          Token kinds (logos) and the positioned Token record
//!   ├── lexing         Source text → Vec<Token>
//!   ├── parsing        Vec<Token> → layers, rule blocks, includes, diagnostics
//!   ├── classification Rule block → ClassifiedRule (ordered matchers)
//!   ├── expression     Boolean layer expression rewriting
//!   ├── diagnostics    Non-fatal anomalies with line numbers
//!   ├── ast            The parse model handed to code generators
//!   ├── analysis       Statistics, rule filters, potential issues
//!   ├── formats        JSON/YAML/listing renderings for inspection
//!   ├── transforms     Composable stage pipeline and the standard transforms
//!   └── loader         File/string facade over the standard transforms
//!
//! Everything downstream of [`ParseResult`](svrf::ast::ParseResult) (code generation, reports,
//! the CLI) lives in other crates and only consumes the parse model.

pub mod svrf;

pub use svrf::ast::{
    AuxiliaryParams, ClassifiedRule, ComparisonOp, Layer, LayerDefinition, ParseResult,
    RuleBlock, RuleCategory,
};
pub use svrf::classification::{Classifier, STANDARD_CLASSIFIER};
pub use svrf::diagnostics::{Diagnostic, Severity};
pub use svrf::loader::{LoaderError, SourceLoader};
