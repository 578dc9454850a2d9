//! Transform pipeline infrastructure
//!
//! Processing stages implement [`Runnable`] and are chained into a [`Transform`] with
//! `.then()`. The compiler checks that each stage's input type is the previous stage's
//! output type:
//!
//! ```rust,ignore
//! let pipeline = Transform::source()
//!     .then(Tokenize)              // String -> Vec<Token>
//!     .then(StructuralParse)       // Vec<Token> -> StructuralOutput
//!     .then(RejectErrors)          // fails on error diagnostics
//!     .then(Classify::standard()); // StructuralOutput -> ParseResult
//! ```
//!
//! Tokenizing, parsing and classifying are total. The only stage that can stop a pipeline
//! is [`RejectErrors`](stages::RejectErrors), used by the strict pipelines.
//!
//! The common pipelines are pre-built as `Lazy` statics in [`standard`]. Most callers go
//! through [`SourceLoader`](crate::svrf::loader::SourceLoader) instead of using them
//! directly.

pub mod stages;
pub mod standard;

use super::diagnostics::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A strict pipeline met a deck with error diagnostics
    #[error("{stage}: deck has {count} error diagnostic(s), first: {first}")]
    DeckRejected {
        stage: &'static str,
        count: usize,
        first: Diagnostic,
    },
}

/// A single processing stage from `I` to `O`
pub trait Runnable<I, O> {
    /// Stage name for logs and errors
    fn name(&self) -> &'static str;

    fn run(&self, input: I) -> Result<O, TransformError>;
}

type StageFn<I, O> = Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>;

/// A chain of stages from `I` to `O`
pub struct Transform<I, O> {
    run_fn: StageFn<I, O>,
}

impl<I: 'static> Transform<I, I> {
    /// Empty pipeline that hands its input to the first stage
    pub fn source() -> Self {
        Transform {
            run_fn: Box::new(Ok),
        }
    }
}

impl<I: 'static, O: 'static> Transform<I, O> {
    /// Append a stage
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                log::trace!("running stage {}", stage.name());
                stage.run(intermediate)
            }),
        }
    }

    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}
