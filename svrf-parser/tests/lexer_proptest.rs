//! Property-based tests for the lexer and structural parser

use proptest::prelude::*;
use svrf_parser::svrf::lexing::{detokenize, tokenize};
use svrf_parser::svrf::parsing::parse_structure;
use svrf_parser::svrf::token::TokenKind;
use svrf_parser::LayerDefinition;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).iter().map(|t| t.kind).collect()
}

/// Layer names that are not keywords
fn layer_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,8}".prop_filter("not a keyword", |name| {
        !tokenize(name)[0].kind.is_keyword()
    })
}

/// Boolean expressions over layer names
fn expression_strategy() -> impl Strategy<Value = String> {
    (
        layer_name_strategy(),
        prop::sample::select(vec!["AND", "OR", "NOT"]),
        layer_name_strategy(),
    )
        .prop_map(|(a, op, b)| format!("{} {} {}", a, op, b))
}

/// Source-like text, including characters the lexer drops
fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("LAYER ".to_string()),
            Just("INTERNAL1 ".to_string()),
            Just("{ ".to_string()),
            Just("} ".to_string()),
            Just(">= ".to_string()),
            Just("== ".to_string()),
            Just("\n".to_string()),
            Just("// note\n".to_string()),
            Just("\"a \\\" b\" ".to_string()),
            "[A-Za-z_][A-Za-z0-9_]{0,6} ",
            "[0-9]{1,3}(\\.[0-9]{1,3})? ",
            "[#$%&!?-]",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn test_tokenize_never_panics(source in "\\PC*") {
        let tokens = tokenize(&source);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfInput));
    }

    #[test]
    fn test_structural_parse_terminates(source in source_strategy()) {
        let out = parse_structure(&tokenize(&source));
        let open_braces = source.matches('{').count();
        prop_assert!(out.blocks.len() <= open_braces);
    }

    #[test]
    fn test_detokenize_is_idempotent(source in source_strategy()) {
        let first = tokenize(&source);
        let rebuilt = detokenize(&first);
        prop_assert_eq!(kinds(&source), kinds(&rebuilt));
        let again = detokenize(&tokenize(&rebuilt));
        prop_assert_eq!(kinds(&rebuilt), kinds(&again));
    }

    #[test]
    fn test_primitive_layer_statement(name in layer_name_strategy(), gds in 0i64..100_000) {
        let out = parse_structure(&tokenize(&format!("LAYER {} {}", name, gds)));
        prop_assert_eq!(out.layers.len(), 1);
        prop_assert_eq!(&out.layers[0].name, &name);
        prop_assert_eq!(&out.layers[0].definition, &LayerDefinition::Primitive(gds));
        prop_assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_derived_surface_forms_agree(name in layer_name_strategy(), expr in expression_strategy()) {
        let keyword = parse_structure(&tokenize(&format!("LAYER {} = {}", name, expr)));
        let bare = parse_structure(&tokenize(&format!("{} = {}", name, expr)));
        prop_assert_eq!(&keyword.layers, &bare.layers);
        prop_assert_eq!(&keyword.layers[0].definition, &LayerDefinition::Derived(expr.clone()));
    }
}
