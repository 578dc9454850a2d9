//! ICV generation for parsed SVRF decks
//!
//!     Consumes a [`ParseResult`](svrf_parser::ParseResult) and nothing else. Each classified
//!     rule maps to one or more ICV checks through a fixed per-category template; the writer
//!     lays them out as a header, a `run_options` block, layer definitions, and rule blocks
//!     grouped by category.
//!
//!     This is a pure lib: no printing, no environment, no file writes. The CLI owns those.
//!
//!     .
//!     ├── error.rs        FormatError
//!     ├── options.rs      IcvOptions / RunOptions (serde, used by svrf-config)
//!     ├── layers.rs       Layer → `LAYER X = ...;`
//!     ├── rules.rs        ClassifiedRule → IcvRule
//!     ├── writer.rs       Whole-deck rendering and the translation summary
//!     ├── format.rs       OutputFormat trait
//!     └── registry.rs     Output formats by name

pub mod error;
pub mod format;
pub mod layers;
pub mod options;
pub mod registry;
pub mod rules;
pub mod writer;

pub use error::FormatError;
pub use format::OutputFormat;
pub use layers::translate_layer;
pub use options::{IcvOptions, RunOptions};
pub use registry::FormatRegistry;
pub use rules::{translate_rule, IcvCheck, IcvRule};
pub use writer::{IcvWriter, TranslationSummary};
