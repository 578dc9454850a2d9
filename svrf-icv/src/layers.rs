use svrf_parser::{Layer, LayerDefinition};

/// Render one layer definition.
///
/// Derived expressions get their connectives rewritten. A layer whose definition could not be
/// read is kept as a comment so the output still names it.
pub fn translate_layer(layer: &Layer) -> String {
    match &layer.definition {
        LayerDefinition::Primitive(gds) => format!("LAYER {} = {};", layer.name, gds),
        LayerDefinition::Derived(_) => format!(
            "LAYER {} = {};",
            layer.name,
            layer.target_expression().unwrap_or_default()
        ),
        LayerDefinition::Unresolved => format!(
            "// LAYER {}: definition at line {} could not be read",
            layer.name, layer.source_line
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive() {
        assert_eq!(translate_layer(&Layer::primitive("M1", 31, 1)), "LAYER M1 = 31;");
    }

    #[test]
    fn test_derived_is_rewritten() {
        let layer = Layer::derived("GATE", "(POLY AND ACTIVE) NOT NWELL", 3);
        assert_eq!(
            translate_layer(&layer),
            "LAYER GATE = (POLY & ACTIVE) ! NWELL;"
        );
    }

    #[test]
    fn test_unresolved_is_a_comment() {
        let layer = Layer::unresolved("BAD", 9);
        assert_eq!(
            translate_layer(&layer),
            "// LAYER BAD: definition at line 9 could not be read"
        );
    }
}
