//! Rule templates
//!
//! | category              | check                                   |
//! |-----------------------|-----------------------------------------|
//! | width                 | `width(L) op v`                         |
//! | length                | `length(L) op v`                        |
//! | spacing               | `space(L) op v`                         |
//! | inter_layer_spacing   | `space(L1, L2) op v`                    |
//! | area                  | `area(L) op v`                          |
//! | density               | `density(L, x, y) op v`                 |
//! | enclosure             | `enclosure(OUTER, INNER) op v`          |
//! | antenna               | `antenna_ratio(METAL, GATE) <= r`       |
//! | pattern_rectangle     | `length(L) op v` and `width(L) op v`    |
//! | same_mask_spacing     | `space_same_mask(L) op v`               |
//! | opposite_constraint   | `width_opposite(L) op v`                |
//!
//! Rectangle rules become two ICV rules, `<name>_part1` for length and `<name>_part2` for
//! width. Unknown rules produce no check and are emitted as a comment block.

use svrf_parser::{ClassifiedRule, ComparisonOp, RuleCategory};

/// One `rule name { check_rule = ...; error_message = ...; }` block
#[derive(Debug, Clone, PartialEq)]
pub struct IcvCheck {
    pub name: String,
    pub check_rule: String,
    pub error_message: String,
}

impl IcvCheck {
    pub fn render(&self) -> String {
        format!(
            "rule {} {{\n    check_rule = {};\n    error_message = \"{}\";\n}}\n",
            self.name,
            self.check_rule,
            escape(&self.error_message)
        )
    }
}

/// Translation of one source rule
#[derive(Debug, Clone, PartialEq)]
pub struct IcvRule {
    pub source_name: String,
    pub description: String,
    pub category: RuleCategory,
    pub source_line: usize,
    /// Empty when the rule needs manual translation
    pub checks: Vec<IcvCheck>,
}

impl IcvRule {
    pub fn needs_manual_translation(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = format!("// Rule: {}\n", self.source_name);
        if !self.description.is_empty() {
            out.push_str(&format!("// Description: {}\n", self.description));
        }
        if self.needs_manual_translation() {
            out.push_str(&format!(
                "// MANUAL TRANSLATION REQUIRED (line {}): no template for this rule body\n",
                self.source_line
            ));
            return out;
        }
        let mut first = true;
        for check in &self.checks {
            if !first {
                out.push('\n');
            }
            out.push_str(&check.render());
            first = false;
        }
        out
    }
}

pub fn translate_rule(rule: &ClassifiedRule) -> IcvRule {
    let base = rule.name.to_lowercase();
    let message = if rule.description.is_empty() {
        rule.name.clone()
    } else {
        rule.description.clone()
    };
    let layer = rule.primary_layer.as_str();

    let checks = match (&rule.category, rule.operator) {
        (RuleCategory::Unknown, _) | (_, None) => Vec::new(),
        (
            RuleCategory::PatternRectangle {
                length_op,
                length_val,
                width_op,
                width_val,
            },
            _,
        ) => vec![
            IcvCheck {
                name: format!("{}_part1", base),
                check_rule: bound(&format!("length({})", layer), *length_op, *length_val),
                error_message: format!("{} (length)", message),
            },
            IcvCheck {
                name: format!("{}_part2", base),
                check_rule: bound(&format!("width({})", layer), *width_op, *width_val),
                error_message: format!("{} (width)", message),
            },
        ],
        (category, Some(op)) => {
            let measure = match category {
                RuleCategory::Width => format!("width({})", layer),
                RuleCategory::Length => format!("length({})", layer),
                RuleCategory::Spacing => format!("space({})", layer),
                RuleCategory::InterLayerSpacing => match &rule.secondary_layer {
                    Some(second) => format!("space({}, {})", layer, second),
                    None => format!("space({})", layer),
                },
                RuleCategory::Area => format!("area({})", layer),
                RuleCategory::Density { window_x, window_y } => {
                    format!("density({}, {}, {})", layer, window_x, window_y)
                }
                RuleCategory::Enclosure { outer_layer } => {
                    format!("enclosure({}, {})", outer_layer, layer)
                }
                RuleCategory::Antenna { gate_layer, .. } => {
                    format!("antenna_ratio({}, {})", layer, gate_layer)
                }
                RuleCategory::SameMaskSpacing => format!("space_same_mask({})", layer),
                RuleCategory::OppositeConstraint => format!("width_opposite({})", layer),
                RuleCategory::PatternRectangle { .. } | RuleCategory::Unknown => String::new(),
            };
            vec![IcvCheck {
                name: base,
                check_rule: bound(&measure, op, rule.threshold),
                error_message: message,
            }]
        }
    };

    if checks.is_empty() {
        log::debug!("rule {} left for manual translation", rule.name);
    }
    IcvRule {
        source_name: rule.name.clone(),
        description: rule.description.clone(),
        category: rule.category.clone(),
        source_line: rule.source_line,
        checks,
    }
}

fn bound(measure: &str, op: ComparisonOp, value: f64) -> String {
    format!("{} {} {}", measure, op, value)
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
