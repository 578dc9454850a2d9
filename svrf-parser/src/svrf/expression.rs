//! Layer expression rewriting
//!
//! Derived layers are kept as the source expression text. Translating them is a plain
//! whole-word substitution of the boolean connectives; operator precedence, grouping and
//! parentheses are left exactly as written.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CONNECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(AND|OR|NOT)\b").unwrap());

/// Map a boolean connective keyword to its target-language operator
pub fn target_operator(connective: &str) -> Option<&'static str> {
    match connective {
        "AND" => Some("&"),
        "OR" => Some("|"),
        "NOT" => Some("!"),
        _ => None,
    }
}

/// Rewrite `AND`/`OR`/`NOT` into `&`/`|`/`!`, leaving everything else untouched.
pub fn rewrite(expr: &str) -> String {
    CONNECTIVE
        .replace_all(expr, |caps: &Captures| {
            target_operator(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}
