//! Deck statistics and sanity checks over a [`ParseResult`]

use super::ast::{ClassifiedRule, ComparisonOp, LayerDefinition, ParseResult, RuleCategory};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Rules with a `<` bound below this are reported as very restrictive
pub const RESTRICTIVE_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub total_layers: usize,
    pub primitive_layers: usize,
    pub derived_layers: usize,
    pub unresolved_layers: usize,
    pub redefined_layers: usize,
    pub total_rules: usize,
    /// Rule count per category name, only categories that occur
    pub rules_by_category: BTreeMap<&'static str, usize>,
    pub unknown_rules: usize,
    pub includes: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl Statistics {
    pub fn collect(result: &ParseResult) -> Self {
        let mut stats = Statistics {
            total_rules: result.rules.len(),
            includes: result.includes.len(),
            errors: result.errors().count(),
            warnings: result.warnings().count(),
            ..Default::default()
        };

        for layer in result.effective_layers() {
            stats.total_layers += 1;
            match layer.definition {
                LayerDefinition::Primitive(_) => stats.primitive_layers += 1,
                LayerDefinition::Derived(_) => stats.derived_layers += 1,
                LayerDefinition::Unresolved => stats.unresolved_layers += 1,
            }
        }
        stats.redefined_layers = result.layers.len() - stats.total_layers;

        for rule in &result.rules {
            *stats.rules_by_category.entry(rule.category.name()).or_insert(0) += 1;
            if rule.category.is_unknown() {
                stats.unknown_rules += 1;
            }
        }
        stats
    }

    /// Share of rules with a known category, in percent
    pub fn coverage(&self) -> f64 {
        if self.total_rules == 0 {
            return 100.0;
        }
        let known = self.total_rules - self.unknown_rules;
        known as f64 * 100.0 / self.total_rules as f64
    }
}

/// Things in a deck worth a second look
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PotentialIssues {
    /// Layers no rule refers to, in definition order
    pub unused_layers: Vec<String>,
    /// Rules with a `<` bound below [`RESTRICTIVE_THRESHOLD`]
    pub restrictive_rules: Vec<String>,
}

impl PotentialIssues {
    pub fn is_empty(&self) -> bool {
        self.unused_layers.is_empty() && self.restrictive_rules.is_empty()
    }
}

impl ParseResult {
    pub fn statistics(&self) -> Statistics {
        Statistics::collect(self)
    }

    /// Single-layer and inter-layer spacing rules, same-mask spacing included
    pub fn spacing_rules(&self) -> Vec<&ClassifiedRule> {
        self.rules
            .iter()
            .filter(|rule| {
                matches!(
                    rule.category,
                    RuleCategory::Spacing
                        | RuleCategory::InterLayerSpacing
                        | RuleCategory::SameMaskSpacing
                )
            })
            .collect()
    }

    pub fn width_rules(&self) -> Vec<&ClassifiedRule> {
        self.rules
            .iter()
            .filter(|rule| {
                matches!(
                    rule.category,
                    RuleCategory::Width | RuleCategory::OppositeConstraint
                )
            })
            .collect()
    }

    pub fn potential_issues(&self) -> PotentialIssues {
        let referenced: HashSet<&str> = self.rules.iter().flat_map(|r| r.layers()).collect();
        let unused_layers = self
            .effective_layers()
            .filter(|layer| !referenced.contains(layer.name.as_str()))
            .map(|layer| layer.name.clone())
            .collect();
        let restrictive_rules = self
            .rules
            .iter()
            .filter(|rule| {
                rule.operator == Some(ComparisonOp::Lt) && rule.threshold < RESTRICTIVE_THRESHOLD
            })
            .map(|rule| rule.name.clone())
            .collect();
        PotentialIssues {
            unused_layers,
            restrictive_rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::svrf::lexing::tokenize;
    use crate::svrf::parsing::parse;

    const DECK: &str = "\
LAYER M1 31
LAYER M2 32
LAYER POLY 13
LAYER M1 99
GATE = POLY AND M1
W1 { INTERNAL1 M1 < 0.05 }
S1 { EXTERNAL M1 M2 < 0.2 }
S2 { EXTERNAL1 M2 < 0.08 SAME_MASK }
X { SOMETHING ELSE }
";

    #[test]
    fn test_statistics() {
        let stats = parse(&tokenize(DECK)).statistics();
        assert_eq!(stats.total_layers, 4);
        assert_eq!(stats.primitive_layers, 3);
        assert_eq!(stats.derived_layers, 1);
        assert_eq!(stats.redefined_layers, 1);
        assert_eq!(stats.total_rules, 4);
        assert_eq!(stats.unknown_rules, 1);
        assert_eq!(stats.rules_by_category.get("width"), Some(&1));
        assert_eq!(stats.warnings, 1);
        assert_eq!(stats.coverage(), 75.0);
    }

    #[test]
    fn test_rule_filters() {
        let result = parse(&tokenize(DECK));
        let spacing: Vec<_> = result.spacing_rules().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(spacing, vec!["S1", "S2"]);
        assert_eq!(result.width_rules().len(), 1);
    }

    #[test]
    fn test_potential_issues() {
        let issues = parse(&tokenize(DECK)).potential_issues();
        assert_eq!(issues.unused_layers, vec!["POLY", "GATE"]);
        assert_eq!(issues.restrictive_rules, vec!["W1", "S2"]);
        assert!(!issues.is_empty());
    }
}
