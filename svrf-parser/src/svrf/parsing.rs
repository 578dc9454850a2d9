//! Structural parser
//!
//!     A single forward pass over the token stream, dispatching on the kind of the current
//!     token (and one token of lookahead for bare identifiers):
//!
//!         INCLUDE "path"          include path
//!         LAYOUT ...              skipped to end of line
//!         LAYER name <number>     primitive layer
//!         LAYER name = expr       derived layer
//!         name = expr             derived layer, same record as the keyword form
//!         name { ... }            rule block, may span any number of lines; the name may
//!                                 also be a keyword (`AREA { ... }`)
//!
//!     Tokens left on the line after a complete INCLUDE or primitive LAYER statement are
//!     skipped with one `trailing-tokens` warning. Anything else is skipped one token at a
//!     time with at most one warning per line.
//!     Nothing here aborts: every anomaly becomes a diagnostic and the scan continues with
//!     the next token. If a step consumes nothing the parser still advances by one token.
//!
//!     Rule blocks are collected structurally only; [`parse`] hands them to the standard
//!     [`Classifier`](super::classification::Classifier).

use super::ast::{Layer, ParseResult, RuleBlock};
use super::classification::{Classifier, STANDARD_CLASSIFIER};
use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::token::{Token, TokenKind};
use serde::Serialize;
use std::collections::HashMap;

/// Layers, unclassified rule blocks, includes and diagnostics of one source
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuralOutput {
    pub layers: Vec<Layer>,
    pub blocks: Vec<RuleBlock>,
    pub includes: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl StructuralOutput {
    /// Classify every block and produce the final result.
    pub fn classify(self, classifier: &Classifier) -> ParseResult {
        ParseResult {
            rules: classifier.classify_all(&self.blocks),
            layers: self.layers,
            includes: self.includes,
            diagnostics: self.diagnostics,
        }
    }
}

/// Parse tokens and classify rule blocks with the standard classifier
pub fn parse(tokens: &[Token]) -> ParseResult {
    parse_with(tokens, &STANDARD_CLASSIFIER)
}

/// Parse tokens and classify rule blocks with the given classifier
pub fn parse_with(tokens: &[Token], classifier: &Classifier) -> ParseResult {
    parse_structure(tokens).classify(classifier)
}

/// Run only the structural pass
pub fn parse_structure(tokens: &[Token]) -> StructuralOutput {
    StructuralParser::new(tokens).run()
}

/// Join tokens into one line of text.
///
/// Comments and newlines are dropped. Tokens that were adjacent in the source stay adjacent
/// (so `>` `=` written as `>=` comes back as `>=`), anything else is separated by one space.
pub fn join_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut previous_end: Option<usize> = None;
    for token in tokens {
        if matches!(
            token.kind,
            TokenKind::Comment | TokenKind::Newline | TokenKind::EndOfInput
        ) {
            continue;
        }
        if let Some(end) = previous_end {
            if end != token.span.start {
                out.push(' ');
            }
        }
        out.push_str(&token.source_form());
        previous_end = Some(token.span.end);
    }
    out
}

pub struct StructuralParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    layers: Vec<Layer>,
    blocks: Vec<RuleBlock>,
    includes: Vec<String>,
    diagnostics: DiagnosticCollector,
    first_definitions: HashMap<String, usize>,
    last_unrecognized_line: Option<usize>,
}

impl<'a> StructuralParser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            layers: Vec::new(),
            blocks: Vec::new(),
            includes: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
            first_definitions: HashMap::new(),
            last_unrecognized_line: None,
        }
    }

    pub fn run(mut self) -> StructuralOutput {
        while !self.at_end() {
            let before = self.pos;
            self.statement();
            if self.pos == before {
                self.pos += 1;
            }
        }
        log::debug!(
            "structural pass: {} layers, {} blocks, {} includes",
            self.layers.len(),
            self.blocks.len(),
            self.includes.len()
        );
        StructuralOutput {
            layers: self.layers,
            blocks: self.blocks,
            includes: self.includes,
            diagnostics: self.diagnostics.into_vec(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len() || self.current().is(TokenKind::EndOfInput)
    }

    fn current(&self) -> &'a Token {
        let tokens = self.tokens;
        &tokens[self.pos]
    }

    fn peek_kind(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| t.kind)
    }

    fn advance(&mut self) -> &'a Token {
        let token = self.current();
        self.pos += 1;
        token
    }

    /// Skip the remainder of the current line, leaving the newline for the main loop.
    fn skip_line(&mut self) {
        while !self.at_end() && !self.current().kind.ends_statement() {
            self.pos += 1;
        }
    }

    /// Close a complete statement. Anything but a comment before the end of the line is
    /// reported once and skipped.
    fn end_statement(&mut self, statement: &str) {
        let start = self.pos;
        self.skip_line();
        let trailing = self.tokens[start..self.pos]
            .iter()
            .find(|t| !t.is(TokenKind::Comment));
        if let Some(token) = trailing {
            self.diagnostics.warning(
                token.line,
                "trailing-tokens",
                format!(
                    "ignoring {} after complete {} statement",
                    describe(token),
                    statement
                ),
            );
        }
    }

    fn statement(&mut self) {
        let token = self.current();
        match token.kind {
            TokenKind::Newline | TokenKind::Comment => self.pos += 1,
            TokenKind::Include => self.include(),
            TokenKind::Layout => self.skip_line(),
            TokenKind::Layer => self.layer_keyword(),
            TokenKind::Identifier => match self.peek_kind(1) {
                Some(TokenKind::Assign) => {
                    self.pos += 2;
                    self.derived_layer(token);
                }
                Some(TokenKind::LeftBrace) => self.rule_block(),
                _ => self.unrecognized(),
            },
            // rule names may collide with keywords, e.g. `DENSITY { ... }`
            kind if kind.is_keyword() && self.peek_kind(1) == Some(TokenKind::LeftBrace) => {
                self.rule_block()
            }
            _ => self.unrecognized(),
        }
    }

    fn include(&mut self) {
        let keyword = self.advance();
        match self.tokens.get(self.pos) {
            Some(path) if path.is(TokenKind::StringLiteral) => {
                self.includes.push(path.text.clone());
                self.pos += 1;
                self.end_statement("INCLUDE");
            }
            _ => {
                self.diagnostics.error(
                    keyword.line,
                    "include-syntax",
                    "expected quoted path after INCLUDE",
                );
                self.skip_line();
            }
        }
    }

    fn layer_keyword(&mut self) {
        let keyword = self.advance();
        if self.at_end() || !self.current().is(TokenKind::Identifier) {
            self.diagnostics.error(
                keyword.line,
                "layer-syntax",
                "expected layer name after LAYER",
            );
            self.skip_line();
            return;
        }
        let name = self.advance();
        match self.peek_kind(0) {
            Some(TokenKind::Number) => {
                let number = self.advance();
                self.primitive_layer(name, number);
                self.end_statement("LAYER");
            }
            Some(TokenKind::Assign) => {
                self.pos += 1;
                self.derived_layer(name);
            }
            _ => {
                self.diagnostics.error(
                    name.line,
                    "layer-syntax",
                    format!(
                        "expected GDS number or '=' after layer name '{}'",
                        name.text
                    ),
                );
                self.skip_line();
            }
        }
    }

    fn primitive_layer(&mut self, name: &Token, number: &Token) {
        let layer = match parse_gds_number(&number.text) {
            Some(gds) => Layer::primitive(&name.text, gds, name.line),
            None => {
                self.diagnostics.error(
                    number.line,
                    "invalid-layer-number",
                    format!(
                        "cannot read '{}' as a layer number for '{}'",
                        number.text, name.text
                    ),
                );
                Layer::unresolved(&name.text, name.line)
            }
        };
        self.record_layer(layer);
    }

    /// Collect the expression after `=`; the cursor is on the first expression token.
    fn derived_layer(&mut self, name: &Token) {
        let start = self.pos;
        while !self.at_end()
            && !matches!(
                self.current().kind,
                TokenKind::Newline | TokenKind::LeftBrace
            )
        {
            self.pos += 1;
        }
        let expression = join_tokens(&self.tokens[start..self.pos]);
        let layer = if expression.is_empty() {
            self.diagnostics.error(
                name.line,
                "empty-expression",
                format!("layer '{}' has an empty expression", name.text),
            );
            Layer::unresolved(&name.text, name.line)
        } else {
            Layer::derived(&name.text, expression, name.line)
        };
        self.record_layer(layer);
    }

    fn record_layer(&mut self, layer: Layer) {
        match self.first_definitions.get(&layer.name) {
            Some(first_line) => self.diagnostics.warning(
                layer.source_line,
                "layer-redefined",
                format!(
                    "layer '{}' redefined, first definition at line {} is kept",
                    layer.name, first_line
                ),
            ),
            None => {
                self.first_definitions
                    .insert(layer.name.clone(), layer.source_line);
            }
        }
        self.layers.push(layer);
    }

    /// `name {` ... `}` with brace-depth counting; the cursor is on the name.
    fn rule_block(&mut self) {
        let name = self.advance();
        self.pos += 1; // opening brace
        let start = self.pos;
        let mut depth = 1usize;
        let mut end = None;
        while !self.at_end() {
            match self.current().kind {
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(self.pos);
                        self.pos += 1;
                        break;
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
        let body_end = end.unwrap_or(self.pos);
        if end.is_none() {
            self.diagnostics.error(
                name.line,
                "unclosed-block",
                format!("rule block '{}' is never closed", name.text),
            );
        }
        let raw_content = join_tokens(&self.tokens[start..body_end]);
        self.blocks
            .push(RuleBlock::new(&name.text, raw_content, name.line));
    }

    fn unrecognized(&mut self) {
        let token = self.advance();
        if self.last_unrecognized_line != Some(token.line) {
            self.last_unrecognized_line = Some(token.line);
            self.diagnostics.warning(
                token.line,
                "unrecognized-statement",
                format!("unrecognized statement starting with {}", describe(token)),
            );
        }
    }
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Identifier | TokenKind::Number => format!("'{}'", token.text),
        kind => kind.to_string(),
    }
}

/// GDS numbers are integers; a fractional number is truncated.
fn parse_gds_number(text: &str) -> Option<i64> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }
    let value = text.parse::<f64>().ok()?;
    value.is_finite().then(|| value.trunc() as i64)
}
