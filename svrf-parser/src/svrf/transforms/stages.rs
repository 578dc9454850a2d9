//! Individual pipeline stages
//!
//! | stage             | input              | output             | fails                    |
//! |-------------------|--------------------|--------------------|--------------------------|
//! | `Tokenize`        | `String`           | `Vec<Token>`       | never                    |
//! | `StructuralParse` | `Vec<Token>`       | `StructuralOutput` | never                    |
//! | `RejectErrors`    | `StructuralOutput` | `StructuralOutput` | on any error diagnostic  |
//! | `Classify`        | `StructuralOutput` | `ParseResult`      | never                    |

use super::{Runnable, TransformError};
use crate::svrf::ast::ParseResult;
use crate::svrf::classification::{Classifier, STANDARD_CLASSIFIER};
use crate::svrf::diagnostics::Severity;
use crate::svrf::lexing::tokenize;
use crate::svrf::parsing::{parse_structure, StructuralOutput};
use crate::svrf::token::Token;

#[derive(Debug, Default, Clone, Copy)]
pub struct Tokenize;

impl Runnable<String, Vec<Token>> for Tokenize {
    fn name(&self) -> &'static str {
        "tokenize"
    }

    fn run(&self, input: String) -> Result<Vec<Token>, TransformError> {
        Ok(tokenize(&input))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralParse;

impl Runnable<Vec<Token>, StructuralOutput> for StructuralParse {
    fn name(&self) -> &'static str {
        "structural-parse"
    }

    fn run(&self, input: Vec<Token>) -> Result<StructuralOutput, TransformError> {
        Ok(parse_structure(&input))
    }
}

/// Gate for strict pipelines: passes the structure through unless the structural pass
/// recorded an error. Warnings never reject a deck.
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectErrors;

impl Runnable<StructuralOutput, StructuralOutput> for RejectErrors {
    fn name(&self) -> &'static str {
        "reject-errors"
    }

    fn run(&self, input: StructuralOutput) -> Result<StructuralOutput, TransformError> {
        let mut errors = input
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error);
        let Some(first) = errors.next() else {
            return Ok(input);
        };
        Err(TransformError::DeckRejected {
            stage: self.name(),
            count: 1 + errors.count(),
            first: first.clone(),
        })
    }
}

/// Classification with a borrowed, shared classifier
pub struct Classify {
    classifier: &'static Classifier,
}

impl Classify {
    pub fn new(classifier: &'static Classifier) -> Self {
        Self { classifier }
    }

    pub fn standard() -> Self {
        Self::new(&STANDARD_CLASSIFIER)
    }
}

impl Default for Classify {
    fn default() -> Self {
        Self::standard()
    }
}

impl Runnable<StructuralOutput, ParseResult> for Classify {
    fn name(&self) -> &'static str {
        "classify"
    }

    fn run(&self, input: StructuralOutput) -> Result<ParseResult, TransformError> {
        Ok(input.classify(self.classifier))
    }
}
