//! Whole-deck rendering
//!
//! Output layout:
//!     header comments (technology, process node, counts)
//!     run_options block
//!     layer definitions, first definition of each name only
//!     rule blocks, grouped by category in catalogue order, source order within a group

use crate::layers::translate_layer;
use crate::options::IcvOptions;
use crate::rules::{translate_rule, IcvRule};
use serde::Serialize;
use std::fmt;
use svrf_parser::{ParseResult, RuleCategory};

pub struct IcvWriter<'a> {
    options: &'a IcvOptions,
}

impl<'a> IcvWriter<'a> {
    pub fn new(options: &'a IcvOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, result: &ParseResult) -> String {
        let layers: Vec<String> = result.effective_layers().map(translate_layer).collect();
        let rules: Vec<IcvRule> = result.rules.iter().map(translate_rule).collect();
        let check_count: usize = rules.iter().map(|r| r.checks.len()).sum();

        let mut out = String::new();
        out.push_str("// ICV DRC rules translated from SVRF\n");
        out.push_str(&format!("// Technology: {}\n", self.options.technology));
        out.push_str(&format!("// Process Node: {}\n", self.options.process_node));
        out.push_str(&format!("// Total Rules: {}\n", check_count));
        out.push_str(&format!("// Total Layers: {}\n\n", layers.len()));

        out.push_str("// Run Options\n");
        out.push_str(&self.options.run_options.render());
        out.push('\n');

        out.push_str("// Layer Definitions\n");
        for layer in &layers {
            out.push_str(layer);
            out.push('\n');
        }

        for (ordinal, title) in RuleCategory::NAMES.iter().enumerate() {
            let group: Vec<&IcvRule> = rules
                .iter()
                .filter(|r| r.category.ordinal() == ordinal)
                .collect();
            if group.is_empty() {
                continue;
            }
            out.push_str(&format!("\n// {} Rules\n", group_title(title)));
            for rule in group {
                out.push_str(&rule.render());
            }
        }
        out
    }
}

/// `inter_layer_spacing` → `Inter Layer Spacing`
fn group_title(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Counts reported after a translation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationSummary {
    pub input_layers: usize,
    pub output_layers: usize,
    pub input_rules: usize,
    pub translated_rules: usize,
    pub manual_rules: usize,
    /// Names of the rules that need manual translation, in source order
    pub manual_rule_names: Vec<String>,
    pub diagnostics: usize,
}

impl TranslationSummary {
    pub fn from_result(result: &ParseResult) -> Self {
        let manual_rule_names: Vec<String> =
            result.unknown_rules().map(|r| r.name.clone()).collect();
        Self {
            input_layers: result.layers.len(),
            output_layers: result.effective_layers().count(),
            input_rules: result.rules.len(),
            translated_rules: result.rules.len() - manual_rule_names.len(),
            manual_rules: manual_rule_names.len(),
            manual_rule_names,
            diagnostics: result.diagnostics.len(),
        }
    }

    /// Translated share of the input rules, in percent
    pub fn coverage(&self) -> f64 {
        if self.input_rules == 0 {
            return 100.0;
        }
        self.translated_rules as f64 * 100.0 / self.input_rules as f64
    }
}

impl fmt::Display for TranslationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input layers: {}", self.input_layers)?;
        writeln!(f, "Output layers: {}", self.output_layers)?;
        writeln!(f, "Input rules: {}", self.input_rules)?;
        writeln!(f, "Translated rules: {}", self.translated_rules)?;
        writeln!(f, "Needs manual translation: {}", self.manual_rules)?;
        write!(f, "Coverage: {:.1}%", self.coverage())
    }
}
