//! Lexer
//!
//!     Turns SVRF source text into a flat `Vec<Token>`. The raw classification is done entirely
//!     by logos (see [token](super::token)); this module adds what logos does not track:
//!
//!         1. Semantic text. Comments keep their trimmed body, string literals are unescaped.
//!         2. Positions. Logos hands out byte spans; we convert them to 1-based line/column,
//!            columns counted in characters.
//!         3. The terminal `EndOfInput` token.
//!
//!     Lexing is total. Characters logos cannot match are dropped without a diagnostic, and an
//!     unterminated string simply runs to the end of the input.

use super::token::{Token, TokenKind};
use logos::Logos;

/// Tokenize SVRF source text. Always ends with an `EndOfInput` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = TokenKind::lexer(source);
    let mut cursor = PositionCursor::new(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let Ok(kind) = result else {
            log::trace!("skipping unrecognized input {:?} at byte {}", lexer.slice(), span.start);
            continue;
        };
        let (line, column) = cursor.advance_to(span.start);
        let text = token_text(kind, lexer.slice());
        tokens.push(Token::new(kind, text, line, column, span));
    }

    let (line, column) = cursor.advance_to(source.len());
    tokens.push(Token::new(
        TokenKind::EndOfInput,
        "",
        line,
        column,
        source.len()..source.len(),
    ));
    tokens
}

/// Rebuild source text from a token stream.
///
/// Tokens are separated by a single space, newlines are kept as line breaks. Re-tokenizing
/// the result yields the same sequence of token kinds.
pub fn detokenize(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut at_line_start = true;
    for token in tokens {
        match token.kind {
            TokenKind::EndOfInput => break,
            TokenKind::Newline => {
                out.push('\n');
                at_line_start = true;
            }
            _ => {
                if !at_line_start {
                    out.push(' ');
                }
                out.push_str(&token.source_form());
                at_line_start = false;
            }
        }
    }
    out
}

fn token_text(kind: TokenKind, slice: &str) -> String {
    match kind {
        TokenKind::Comment => slice[2..].trim().to_string(),
        TokenKind::StringLiteral => unescape_string(slice),
        _ => slice.to_string(),
    }
}

/// Strip the quotes of a string lexeme and resolve backslash escapes.
///
/// The closing quote may be missing (unterminated literal).
fn unescape_string(lexeme: &str) -> String {
    let mut chars = lexeme.chars();
    let Some(quote) = chars.next() else {
        return String::new();
    };
    let mut value = String::with_capacity(lexeme.len());
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    value.push(escaped);
                }
            }
            c if c == quote => break,
            c => value.push(c),
        }
    }
    value
}

/// Converts monotonically increasing byte offsets into line/column pairs.
struct PositionCursor<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> PositionCursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn advance_to(&mut self, target: usize) -> (usize, usize) {
        if target > self.offset {
            for ch in self.source[self.offset..target].chars() {
                if ch == '\n' {
                    self.line += 1;
                    self.column = 1;
                } else {
                    self.column += 1;
                }
            }
            self.offset = target;
        }
        (self.line, self.column)
    }
}
