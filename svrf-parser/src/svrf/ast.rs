//! Parse model
//!
//!     The structures in this module are the contract between the parser and everything
//!     downstream of it. A [`ParseResult`] owns all layers, classified rules, include paths
//!     and diagnostics of one source file. Code generators only ever see this type.
//!
//!     Layers follow first-definition-wins: every `LAYER`/assignment statement is recorded in
//!     `layers`, in source order, but [`ParseResult::layer`] and
//!     [`ParseResult::effective_layers`] only ever surface the first record for a name.

use super::diagnostics::{Diagnostic, Severity};
use super::expression;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// How a layer is defined
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LayerDefinition {
    /// Direct GDS layer number
    Primitive(i64),
    /// Boolean expression over other layers, as written in the source
    Derived(String),
    /// The statement named a layer but its definition could not be read
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: String,
    pub definition: LayerDefinition,
    pub source_line: usize,
}

impl Layer {
    pub fn primitive(name: impl Into<String>, gds: i64, source_line: usize) -> Self {
        Self {
            name: name.into(),
            definition: LayerDefinition::Primitive(gds),
            source_line,
        }
    }

    pub fn derived(name: impl Into<String>, expr: impl Into<String>, source_line: usize) -> Self {
        Self {
            name: name.into(),
            definition: LayerDefinition::Derived(expr.into()),
            source_line,
        }
    }

    pub fn unresolved(name: impl Into<String>, source_line: usize) -> Self {
        Self {
            name: name.into(),
            definition: LayerDefinition::Unresolved,
            source_line,
        }
    }

    pub fn gds_number(&self) -> Option<i64> {
        match self.definition {
            LayerDefinition::Primitive(n) => Some(n),
            _ => None,
        }
    }

    pub fn expression(&self) -> Option<&str> {
        match &self.definition {
            LayerDefinition::Derived(expr) => Some(expr),
            _ => None,
        }
    }

    /// Derived expression with connectives rewritten for the target language
    pub fn target_expression(&self) -> Option<String> {
        self.expression().map(expression::rewrite)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.definition, LayerDefinition::Primitive(_))
    }

    pub fn is_derived(&self) -> bool {
        matches!(self.definition, LayerDefinition::Derived(_))
    }
}

/// The unclassified body of one `NAME { ... }` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleBlock {
    pub name: String,
    /// Body between the outer braces, whitespace-normalized onto one line
    pub raw_content: String,
    pub source_line: usize,
}

impl RuleBlock {
    pub fn new(name: impl Into<String>, raw_content: impl Into<String>, source_line: usize) -> Self {
        Self {
            name: name.into(),
            raw_content: raw_content.into(),
            source_line,
        }
    }
}

/// Comparison operator of a rule constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComparisonOp {
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "==")]
    Eq,
}

impl ComparisonOp {
    /// Parse an operator lexeme; anything but the five known operators is rejected.
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            "<" => Some(ComparisonOp::Lt),
            "<=" => Some(ComparisonOp::Le),
            ">" => Some(ComparisonOp::Gt),
            ">=" => Some(ComparisonOp::Ge),
            "==" => Some(ComparisonOp::Eq),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Eq => "==",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Semantic category of a rule, carrying the fields only that category has
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleCategory {
    Width,
    Length,
    Spacing,
    InterLayerSpacing,
    Area,
    Density {
        window_x: f64,
        window_y: f64,
    },
    Enclosure {
        outer_layer: String,
    },
    Antenna {
        gate_layer: String,
        max_ratio: f64,
    },
    PatternRectangle {
        length_op: ComparisonOp,
        length_val: f64,
        width_op: ComparisonOp,
        width_val: f64,
    },
    SameMaskSpacing,
    OppositeConstraint,
    Unknown,
}

impl RuleCategory {
    /// Every category name in catalogue order
    pub const NAMES: [&'static str; 12] = [
        "width",
        "length",
        "spacing",
        "inter_layer_spacing",
        "area",
        "density",
        "enclosure",
        "antenna",
        "pattern_rectangle",
        "same_mask_spacing",
        "opposite_constraint",
        "unknown",
    ];

    pub fn name(&self) -> &'static str {
        Self::NAMES[self.ordinal()]
    }

    /// Position of this category in the catalogue, used to group output
    pub fn ordinal(&self) -> usize {
        match self {
            RuleCategory::Width => 0,
            RuleCategory::Length => 1,
            RuleCategory::Spacing => 2,
            RuleCategory::InterLayerSpacing => 3,
            RuleCategory::Area => 4,
            RuleCategory::Density { .. } => 5,
            RuleCategory::Enclosure { .. } => 6,
            RuleCategory::Antenna { .. } => 7,
            RuleCategory::PatternRectangle { .. } => 8,
            RuleCategory::SameMaskSpacing => 9,
            RuleCategory::OppositeConstraint => 10,
            RuleCategory::Unknown => 11,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, RuleCategory::Unknown)
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Flags that may appear in any rule body regardless of its category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuxiliaryParams {
    pub singular: bool,
    pub opposite: bool,
    pub same_mask: bool,
}

impl AuxiliaryParams {
    pub fn is_empty(&self) -> bool {
        !(self.singular || self.opposite || self.same_mask)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRule {
    pub name: String,
    pub description: String,
    pub category: RuleCategory,
    pub primary_layer: String,
    pub secondary_layer: Option<String>,
    /// `None` only for rules of category `Unknown`
    pub operator: Option<ComparisonOp>,
    pub threshold: f64,
    pub auxiliary: AuxiliaryParams,
    pub source_line: usize,
}

impl ClassifiedRule {
    /// A rule no matcher recognized. Name, description and flags survive.
    pub fn unknown(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: RuleCategory::Unknown,
            primary_layer: String::new(),
            secondary_layer: None,
            operator: None,
            threshold: 0.0,
            auxiliary: AuxiliaryParams::default(),
            source_line: 0,
        }
    }

    /// Every layer name the rule refers to
    pub fn layers(&self) -> Vec<&str> {
        let mut names = Vec::new();
        if !self.primary_layer.is_empty() {
            names.push(self.primary_layer.as_str());
        }
        if let Some(second) = &self.secondary_layer {
            names.push(second.as_str());
        }
        if let RuleCategory::Antenna { gate_layer, .. } = &self.category {
            names.push(gate_layer.as_str());
        }
        names
    }
}

/// Everything one source file parses into
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult {
    pub layers: Vec<Layer>,
    pub rules: Vec<ClassifiedRule>,
    pub includes: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    /// First definition of a layer
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// Layers with later redefinitions filtered out, in source order
    pub fn effective_layers(&self) -> impl Iterator<Item = &Layer> {
        let mut seen = HashSet::new();
        self.layers
            .iter()
            .filter(move |layer| seen.insert(layer.name.as_str()))
    }

    pub fn rule(&self, name: &str) -> Option<&ClassifiedRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Rules that need manual translation
    pub fn unknown_rules(&self) -> impl Iterator<Item = &ClassifiedRule> {
        self.rules.iter().filter(|rule| rule.category.is_unknown())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}
