//! Token definitions for SVRF rule decks
//!
//!     Tokens are defined with the logos derive macro. Keywords are literal `#[token]`s, which
//!     logos prefers over the identifier regex for a match of the same length, so `LAYER` is a
//!     keyword while `LAYERS` or `LAYER_1` stay identifiers. Matching is case sensitive.
//!
//!     `EndOfInput` has no pattern: logos never produces it, the lexer appends it so that the
//!     parser always has a terminal token to stop on.

use logos::Logos;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// All token kinds produced by the SVRF lexer
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[logos(skip r"[ \t\r\f]+")]
pub enum TokenKind {
    // Statement keywords
    #[token("LAYER")]
    Layer,
    #[token("INCLUDE")]
    Include,
    #[token("LAYOUT")]
    Layout,
    #[token("SYSTEM")]
    System,
    #[token("GDSII")]
    Gdsii,

    // Boolean layer connectives
    #[token("AND")]
    And,
    #[token("OR")]
    Or,
    #[token("NOT")]
    Not,
    #[token("INSIDE")]
    Inside,
    #[token("BY")]
    By,

    // Rule category keywords
    #[token("INTERNAL1")]
    Internal1,
    #[token("INTERNAL2")]
    Internal2,
    #[token("EXTERNAL")]
    External,
    #[token("EXTERNAL1")]
    External1,
    #[token("AREA")]
    Area,
    #[token("DENSITY")]
    Density,
    #[token("WINDOW")]
    Window,
    #[token("SINGULAR")]
    Singular,

    // Operators
    #[token("==")]
    EqualEqual,
    #[token("=")]
    Assign,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,

    // Delimiters
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("@")]
    At,

    // Literals
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    #[regex(r"[0-9][0-9.]*|\.[0-9][0-9.]*")]
    Number,
    #[regex(r#""([^"\\]|\\(.|\n))*"?"#)]
    #[regex(r#"'([^'\\]|\\(.|\n))*'?"#)]
    StringLiteral,

    #[regex(r"//[^\n]*")]
    Comment,
    #[token("\n")]
    Newline,

    EndOfInput,
}

impl TokenKind {
    /// Check if this kind is one of the reserved words
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Layer
                | TokenKind::Include
                | TokenKind::Layout
                | TokenKind::System
                | TokenKind::Gdsii
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::Inside
                | TokenKind::By
                | TokenKind::Internal1
                | TokenKind::Internal2
                | TokenKind::External
                | TokenKind::External1
                | TokenKind::Area
                | TokenKind::Density
                | TokenKind::Window
                | TokenKind::Singular
        )
    }

    /// Check if this kind is one of the boolean layer connectives
    pub fn is_connective(&self) -> bool {
        matches!(self, TokenKind::And | TokenKind::Or | TokenKind::Not)
    }

    /// Check if this kind is a comparison operator
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Less | TokenKind::Greater | TokenKind::EqualEqual
        )
    }

    /// Check if this kind ends a line-oriented statement
    pub fn ends_statement(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::EndOfInput)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Layer => "LAYER",
            TokenKind::Include => "INCLUDE",
            TokenKind::Layout => "LAYOUT",
            TokenKind::System => "SYSTEM",
            TokenKind::Gdsii => "GDSII",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Inside => "INSIDE",
            TokenKind::By => "BY",
            TokenKind::Internal1 => "INTERNAL1",
            TokenKind::Internal2 => "INTERNAL2",
            TokenKind::External => "EXTERNAL",
            TokenKind::External1 => "EXTERNAL1",
            TokenKind::Area => "AREA",
            TokenKind::Density => "DENSITY",
            TokenKind::Window => "WINDOW",
            TokenKind::Singular => "SINGULAR",
            TokenKind::EqualEqual => "'=='",
            TokenKind::Assign => "'='",
            TokenKind::Less => "'<'",
            TokenKind::Greater => "'>'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::At => "'@'",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::StringLiteral => "string",
            TokenKind::Comment => "comment",
            TokenKind::Newline => "newline",
            TokenKind::EndOfInput => "end of input",
        };
        write!(f, "{}", name)
    }
}

/// A lexed token with its semantic text and source position.
///
/// `text` is the value, not always the lexeme: comments carry their trimmed body and
/// string literals their unescaped contents. `span` is the byte range of the lexeme, which
/// the parser uses to tell adjacent tokens (`>=`) from separated ones (`> =`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based line
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        line: usize,
        column: usize,
        span: Range<usize>,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Render the token back into source syntax.
    ///
    /// Strings are re-quoted with `"` and re-escaped, comments get their `//` marker back.
    /// For every other kind this is just `text`.
    pub fn source_form(&self) -> String {
        match self.kind {
            TokenKind::StringLiteral => {
                let mut quoted = String::with_capacity(self.text.len() + 2);
                quoted.push('"');
                for ch in self.text.chars() {
                    if ch == '"' || ch == '\\' {
                        quoted.push('\\');
                    }
                    quoted.push(ch);
                }
                quoted.push('"');
                quoted
            }
            TokenKind::Comment if self.text.is_empty() => "//".to_string(),
            TokenKind::Comment => format!("// {}", self.text),
            _ => self.text.clone(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source_form())
    }
}
