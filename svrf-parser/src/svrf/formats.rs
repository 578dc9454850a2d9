//! Debug and inspection renderings of tokens and parse results
//!
//! The rules listing is one line per rule:
//!     <line>  <name>  <category>  <layers>  <op> <threshold>  [flags]
//! Unknown rules print `?` in place of the constraint.

use super::ast::{ClassifiedRule, ParseResult};
use super::token::{Token, TokenKind};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn tokens_to_json(tokens: &[Token]) -> serde_json::Value {
    json!(tokens
        .iter()
        .map(|token| {
            json!({
                "kind": format!("{:?}", token.kind),
                "text": token.text,
                "line": token.line,
                "column": token.column,
                "start": token.span.start,
                "end": token.span.end,
            })
        })
        .collect::<Vec<_>>())
}

/// One token per line, `line:column Kind text`
pub fn tokens_to_simple(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let shown = match token.kind {
            TokenKind::Newline | TokenKind::EndOfInput => String::new(),
            _ => format!(" {}", token.source_form()),
        };
        out.push_str(&format!(
            "{}:{} {:?}{}\n",
            token.line, token.column, token.kind, shown
        ));
    }
    out
}

pub fn to_json(result: &ParseResult) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub fn to_yaml(result: &ParseResult) -> Result<String, FormatError> {
    Ok(serde_yaml::to_string(result)?)
}

pub fn rules_listing(result: &ParseResult) -> String {
    result
        .rules
        .iter()
        .map(rule_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn rule_line(rule: &ClassifiedRule) -> String {
    let constraint = match rule.operator {
        Some(op) => format!("{} {}", op, rule.threshold),
        None => "?".to_string(),
    };
    let mut line = format!(
        "{:>5}  {}  {}  {}  {}",
        rule.source_line,
        rule.name,
        rule.category,
        rule.layers().join(","),
        constraint
    );
    let mut flags = Vec::new();
    if rule.auxiliary.singular {
        flags.push("singular");
    }
    if rule.auxiliary.opposite {
        flags.push("opposite");
    }
    if rule.auxiliary.same_mask {
        flags.push("same_mask");
    }
    if !flags.is_empty() {
        line.push_str(&format!("  [{}]", flags.join(" ")));
    }
    line
}
