//! Diagnostic collection
//!
//! Structural anomalies never stop a parse. They are recorded here with the offending line
//! and handed to the caller inside the [`ParseResult`](super::ast::ParseResult), which may
//! print them. Lexical anomalies are absorbed by the lexer and never reach this module.

use serde::Serialize;
use std::fmt;

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A non-fatal anomaly with a source line reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub line: usize,
    pub severity: Severity,
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, line: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line,
            severity,
            code: None,
        }
    }

    pub fn error(line: usize, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, line, message)
    }

    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, line, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(
                f,
                "{} [{}]: {} at line {}",
                self.severity, code, self.message, self.line
            ),
            None => write!(f, "{}: {} at line {}", self.severity, self.message, self.line),
        }
    }
}

/// Accumulates diagnostics during a single parse.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::debug!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, line: usize, code: &str, message: impl Into<String>) {
        self.push(Diagnostic::error(line, message).with_code(code));
    }

    pub fn warning(&mut self, line: usize, code: &str, message: impl Into<String>) {
        self.push(Diagnostic::warning(line, message).with_code(code));
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_code() {
        let diag = Diagnostic::error(7, "expected layer name after LAYER").with_code("layer-syntax");
        assert_eq!(
            diag.to_string(),
            "error [layer-syntax]: expected layer name after LAYER at line 7"
        );
    }

    #[test]
    fn test_display_without_code() {
        let diag = Diagnostic::warning(2, "unrecognized statement");
        assert_eq!(diag.to_string(), "warning: unrecognized statement at line 2");
    }

    #[test]
    fn test_collector_keeps_order() {
        let mut collector = DiagnosticCollector::new();
        assert!(collector.is_empty());
        collector.error(3, "a", "first");
        collector.warning(1, "b", "second");
        assert_eq!(collector.len(), 2);
        let all = collector.into_vec();
        assert_eq!(all[0].message, "first");
        assert_eq!(all[1].severity, Severity::Warning);
    }
}
