//! Rule classifier
//!
//! Assigns every rule body exactly one [`RuleCategory`] by running an ordered list of
//! matchers against it. Each matcher has two halves: a trigger (the keywords that must be
//! present) and an extractor (a regex over the body shape that yields typed fields). The
//! first matcher whose keywords are present and whose shape reads wins. A matcher whose
//! keywords appear but whose shape does not read passes the body on to the next one, so
//! `AREA M1 < 0.5 EXTERNAL` is still an area rule. Bodies no matcher reads are `Unknown`.
//!
//! The standard order:
//! 1. enclosure (`A NOT INSIDE B BY op n`)
//! 2. antenna (`ANTENNA metal gate MAX RATIO n`)
//! 3. pattern rectangle (`RECTANGLE L LENGTH op n WIDTH op n`)
//! 4. same-mask spacing (`EXTERNAL1 L op n` with `SAME_MASK` anywhere)
//! 5. spacing (`EXTERNAL A B op n`, falling back to `EXTERNAL1? L op n`)
//! 6. density (`DENSITY L WINDOW x y op n`, first clause only)
//! 7. area (`AREA L op n`)
//! 8. length (`INTERNAL2 L op n`)
//! 9. opposite constraint (`INTERNAL1 L op n` with `OPPOSITE` anywhere)
//! 10. width (`INTERNAL1 L op n`)
//!
//! Extractor patterns are written in a small notation: `<layer>`, `<op>` and `<num>` expand
//! to capture groups before compilation. All keyword tests are whole-word and case
//! sensitive.
//!
//! The `@ "text"` annotation is pulled out of the body before any matcher runs, so words in
//! a description never claim a rule.

use super::ast::{AuxiliaryParams, ClassifiedRule, ComparisonOp, RuleBlock, RuleCategory};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const LAYER_PATTERN: &str = r"([A-Za-z_][A-Za-z0-9_]*)";
const OP_PATTERN: &str = r"(<=|>=|==|<|>)";
const NUM_PATTERN: &str = r"([0-9.]+)";

/// Compile an extractor written in placeholder notation
fn compile(grammar: &str) -> Regex {
    let expanded = grammar
        .replace("<layer>", LAYER_PATTERN)
        .replace("<op>", OP_PATTERN)
        .replace("<num>", NUM_PATTERN);
    Regex::new(&expanded).unwrap()
}

fn keyword(word: &str) -> Regex {
    Regex::new(&format!(r"\b{}\b", word)).unwrap()
}

static ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"@\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"#).unwrap());

static SINGULAR: Lazy<Regex> = Lazy::new(|| keyword("SINGULAR"));
static OPPOSITE: Lazy<Regex> = Lazy::new(|| keyword("OPPOSITE"));
static SAME_MASK: Lazy<Regex> = Lazy::new(|| keyword("SAME_MASK"));

/// What an extractor reads out of a body
#[derive(Debug, Clone, PartialEq)]
pub struct RuleShape {
    pub category: RuleCategory,
    pub primary_layer: String,
    pub secondary_layer: Option<String>,
    pub operator: ComparisonOp,
    pub threshold: f64,
}

impl RuleShape {
    fn single(category: RuleCategory, layer: &str, operator: ComparisonOp, threshold: f64) -> Self {
        Self {
            category,
            primary_layer: layer.to_string(),
            secondary_layer: None,
            operator,
            threshold,
        }
    }
}

/// One entry in the classifier's ordered matcher list
pub trait RuleMatcher: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the keywords this matcher needs are present
    fn triggers(&self, body: &str) -> bool;

    /// Read typed fields out of the body, `None` passes it to the next matcher
    fn extract(&self, body: &str) -> Option<RuleShape>;
}

fn op_at(caps: &Captures, index: usize) -> Option<ComparisonOp> {
    ComparisonOp::parse(caps.get(index)?.as_str())
}

fn num_at(caps: &Captures, index: usize) -> Option<f64> {
    caps.get(index)?.as_str().parse().ok()
}

fn text_at<'h>(caps: &Captures<'h>, index: usize) -> Option<&'h str> {
    caps.get(index).map(|m| m.as_str())
}

/// Shared extractor for the `KEYWORD <layer> <op> <num>` family
fn single_layer(re: &Regex, body: &str, category: RuleCategory) -> Option<RuleShape> {
    let caps = re.captures(body)?;
    Some(RuleShape::single(
        category,
        text_at(&caps, 1)?,
        op_at(&caps, 2)?,
        num_at(&caps, 3)?,
    ))
}

pub struct EnclosureMatcher;

static ENCLOSURE_TRIGGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bNOT\s+INSIDE\b").unwrap());
static ENCLOSURE: Lazy<Regex> =
    Lazy::new(|| compile(r"\b<layer>\s+NOT\s+INSIDE\s+<layer>\s+BY\s*<op>\s*<num>"));

impl RuleMatcher for EnclosureMatcher {
    fn name(&self) -> &'static str {
        "enclosure"
    }

    fn triggers(&self, body: &str) -> bool {
        ENCLOSURE_TRIGGER.is_match(body)
    }

    fn extract(&self, body: &str) -> Option<RuleShape> {
        let caps = ENCLOSURE.captures(body)?;
        let inner = text_at(&caps, 1)?;
        let outer = text_at(&caps, 2)?;
        // an exact enclosure is checked as a lower bound
        let operator = match op_at(&caps, 3)? {
            ComparisonOp::Eq => ComparisonOp::Ge,
            op => op,
        };
        Some(RuleShape {
            category: RuleCategory::Enclosure {
                outer_layer: outer.to_string(),
            },
            primary_layer: inner.to_string(),
            secondary_layer: Some(outer.to_string()),
            operator,
            threshold: num_at(&caps, 4)?,
        })
    }
}

pub struct AntennaMatcher;

static ANTENNA_TRIGGER: Lazy<Regex> = Lazy::new(|| keyword("ANTENNA"));
static MAX_RATIO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bMAX\s+RATIO\b").unwrap());
static ANTENNA: Lazy<Regex> =
    Lazy::new(|| compile(r"\bANTENNA\s+<layer>\s+<layer>\s+MAX\s+RATIO\s+<num>"));

impl RuleMatcher for AntennaMatcher {
    fn name(&self) -> &'static str {
        "antenna"
    }

    fn triggers(&self, body: &str) -> bool {
        ANTENNA_TRIGGER.is_match(body) && MAX_RATIO.is_match(body)
    }

    fn extract(&self, body: &str) -> Option<RuleShape> {
        let caps = ANTENNA.captures(body)?;
        let max_ratio = num_at(&caps, 3)?;
        Some(RuleShape {
            category: RuleCategory::Antenna {
                gate_layer: text_at(&caps, 2)?.to_string(),
                max_ratio,
            },
            primary_layer: text_at(&caps, 1)?.to_string(),
            secondary_layer: None,
            operator: ComparisonOp::Le,
            threshold: max_ratio,
        })
    }
}

pub struct RectangleMatcher;

static RECTANGLE_TRIGGER: Lazy<Regex> = Lazy::new(|| keyword("RECTANGLE"));
static RECTANGLE: Lazy<Regex> = Lazy::new(|| {
    compile(r"\bRECTANGLE\s+<layer>\s+LENGTH\s*<op>\s*<num>\s+WIDTH\s*<op>\s*<num>")
});

impl RuleMatcher for RectangleMatcher {
    fn name(&self) -> &'static str {
        "pattern_rectangle"
    }

    fn triggers(&self, body: &str) -> bool {
        RECTANGLE_TRIGGER.is_match(body)
    }

    fn extract(&self, body: &str) -> Option<RuleShape> {
        let caps = RECTANGLE.captures(body)?;
        let length_op = op_at(&caps, 2)?;
        let length_val = num_at(&caps, 3)?;
        Some(RuleShape {
            category: RuleCategory::PatternRectangle {
                length_op,
                length_val,
                width_op: op_at(&caps, 4)?,
                width_val: num_at(&caps, 5)?,
            },
            primary_layer: text_at(&caps, 1)?.to_string(),
            secondary_layer: None,
            operator: length_op,
            threshold: length_val,
        })
    }
}

pub struct SameMaskMatcher;

static EXTERNAL1_KEYWORD: Lazy<Regex> = Lazy::new(|| keyword("EXTERNAL1"));
static SAME_MASK_SPACING: Lazy<Regex> =
    Lazy::new(|| compile(r"\bEXTERNAL1\s+<layer>\s*<op>\s*<num>"));

impl RuleMatcher for SameMaskMatcher {
    fn name(&self) -> &'static str {
        "same_mask_spacing"
    }

    fn triggers(&self, body: &str) -> bool {
        SAME_MASK.is_match(body) && EXTERNAL1_KEYWORD.is_match(body)
    }

    fn extract(&self, body: &str) -> Option<RuleShape> {
        single_layer(&SAME_MASK_SPACING, body, RuleCategory::SameMaskSpacing)
    }
}

pub struct SpacingMatcher;

static SPACING_TRIGGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bEXTERNAL1?\b").unwrap());
static INTER_LAYER_SPACING: Lazy<Regex> =
    Lazy::new(|| compile(r"\bEXTERNAL\s+<layer>\s+<layer>\s*<op>\s*<num>"));
static SINGLE_LAYER_SPACING: Lazy<Regex> =
    Lazy::new(|| compile(r"\bEXTERNAL1?\s+<layer>\s*<op>\s*<num>"));

impl RuleMatcher for SpacingMatcher {
    fn name(&self) -> &'static str {
        "spacing"
    }

    fn triggers(&self, body: &str) -> bool {
        SPACING_TRIGGER.is_match(body)
    }

    fn extract(&self, body: &str) -> Option<RuleShape> {
        if let Some(caps) = INTER_LAYER_SPACING.captures(body) {
            if let (Some(first), Some(second), Some(operator), Some(threshold)) = (
                text_at(&caps, 1),
                text_at(&caps, 2),
                op_at(&caps, 3),
                num_at(&caps, 4),
            ) {
                return Some(RuleShape {
                    category: RuleCategory::InterLayerSpacing,
                    primary_layer: first.to_string(),
                    secondary_layer: Some(second.to_string()),
                    operator,
                    threshold,
                });
            }
        }
        single_layer(&SINGLE_LAYER_SPACING, body, RuleCategory::Spacing)
    }
}

pub struct DensityMatcher;

static DENSITY_TRIGGER: Lazy<Regex> = Lazy::new(|| keyword("DENSITY"));
static WINDOW_KEYWORD: Lazy<Regex> = Lazy::new(|| keyword("WINDOW"));
static DENSITY: Lazy<Regex> =
    Lazy::new(|| compile(r"\bDENSITY\s+<layer>\s+WINDOW\s+<num>\s+<num>\s*<op>\s*<num>"));

impl RuleMatcher for DensityMatcher {
    fn name(&self) -> &'static str {
        "density"
    }

    fn triggers(&self, body: &str) -> bool {
        DENSITY_TRIGGER.is_match(body) && WINDOW_KEYWORD.is_match(body)
    }

    fn extract(&self, body: &str) -> Option<RuleShape> {
        // leftmost clause wins, later DENSITY clauses are ignored
        let caps = DENSITY.captures(body)?;
        Some(RuleShape::single(
            RuleCategory::Density {
                window_x: num_at(&caps, 2)?,
                window_y: num_at(&caps, 3)?,
            },
            text_at(&caps, 1)?,
            op_at(&caps, 4)?,
            num_at(&caps, 5)?,
        ))
    }
}

/// `KEYWORD <layer> <op> <num>` matcher for area, length and width
pub struct KeywordMatcher {
    name: &'static str,
    trigger: &'static Lazy<Regex>,
    shape: &'static Lazy<Regex>,
    category: RuleCategory,
}

static AREA_TRIGGER: Lazy<Regex> = Lazy::new(|| keyword("AREA"));
static AREA: Lazy<Regex> = Lazy::new(|| compile(r"\bAREA\s+<layer>\s*<op>\s*<num>"));
static INTERNAL2_KEYWORD: Lazy<Regex> = Lazy::new(|| keyword("INTERNAL2"));
static LENGTH: Lazy<Regex> = Lazy::new(|| compile(r"\bINTERNAL2\s+<layer>\s*<op>\s*<num>"));
static INTERNAL1_KEYWORD: Lazy<Regex> = Lazy::new(|| keyword("INTERNAL1"));
static WIDTH: Lazy<Regex> = Lazy::new(|| compile(r"\bINTERNAL1\s+<layer>\s*<op>\s*<num>"));

impl KeywordMatcher {
    pub fn area() -> Self {
        Self {
            name: "area",
            trigger: &AREA_TRIGGER,
            shape: &AREA,
            category: RuleCategory::Area,
        }
    }

    pub fn length() -> Self {
        Self {
            name: "length",
            trigger: &INTERNAL2_KEYWORD,
            shape: &LENGTH,
            category: RuleCategory::Length,
        }
    }

    pub fn width() -> Self {
        Self {
            name: "width",
            trigger: &INTERNAL1_KEYWORD,
            shape: &WIDTH,
            category: RuleCategory::Width,
        }
    }
}

impl RuleMatcher for KeywordMatcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn triggers(&self, body: &str) -> bool {
        self.trigger.is_match(body)
    }

    fn extract(&self, body: &str) -> Option<RuleShape> {
        single_layer(self.shape, body, self.category.clone())
    }
}

pub struct OppositeMatcher;

impl RuleMatcher for OppositeMatcher {
    fn name(&self) -> &'static str {
        "opposite_constraint"
    }

    fn triggers(&self, body: &str) -> bool {
        OPPOSITE.is_match(body) && INTERNAL1_KEYWORD.is_match(body)
    }

    fn extract(&self, body: &str) -> Option<RuleShape> {
        single_layer(&WIDTH, body, RuleCategory::OppositeConstraint)
    }
}

/// Ordered, immutable list of matchers
pub struct Classifier {
    matchers: Vec<Box<dyn RuleMatcher>>,
}

/// The standard classifier, built on first use
pub static STANDARD_CLASSIFIER: Lazy<Classifier> = Lazy::new(Classifier::standard);

impl Classifier {
    pub fn new(matchers: Vec<Box<dyn RuleMatcher>>) -> Self {
        Self { matchers }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(EnclosureMatcher),
            Box::new(AntennaMatcher),
            Box::new(RectangleMatcher),
            Box::new(SameMaskMatcher),
            Box::new(SpacingMatcher),
            Box::new(DensityMatcher),
            Box::new(KeywordMatcher::area()),
            Box::new(KeywordMatcher::length()),
            Box::new(OppositeMatcher),
            Box::new(KeywordMatcher::width()),
        ])
    }

    pub fn matcher_names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    /// Classify one rule body. Never fails: unmatched bodies become `Unknown`.
    pub fn classify(&self, name: &str, content: &str) -> ClassifiedRule {
        let (description, body) = split_annotation(content);
        let auxiliary = AuxiliaryParams {
            singular: SINGULAR.is_match(&body),
            opposite: OPPOSITE.is_match(&body),
            same_mask: SAME_MASK.is_match(&body),
        };

        let mut rule = ClassifiedRule::unknown(name, description);
        rule.auxiliary = auxiliary;

        let shape = self.matchers.iter().find_map(|matcher| {
            if !matcher.triggers(&body) {
                return None;
            }
            let shape = matcher.extract(&body);
            if shape.is_none() {
                log::trace!("rule {}: {} keywords present, shape not read", name, matcher.name());
            }
            shape
        });
        match shape {
            Some(shape) => {
                rule.category = shape.category;
                rule.primary_layer = shape.primary_layer;
                rule.secondary_layer = shape.secondary_layer;
                rule.operator = Some(shape.operator);
                rule.threshold = shape.threshold;
            }
            None => log::debug!("rule {} matched no category", name),
        }
        rule
    }

    pub fn classify_block(&self, block: &RuleBlock) -> ClassifiedRule {
        let mut rule = self.classify(&block.name, &block.raw_content);
        rule.source_line = block.source_line;
        rule
    }

    pub fn classify_all(&self, blocks: &[RuleBlock]) -> Vec<ClassifiedRule> {
        blocks.iter().map(|b| self.classify_block(b)).collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::standard()
    }
}

/// Take the first `@ "text"` annotation as the description and blank out all annotations.
fn split_annotation(content: &str) -> (String, String) {
    let description = ANNOTATION
        .captures(content)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| unescape(m.as_str()))
        .unwrap_or_default();
    let body = ANNOTATION.replace_all(content, " ").into_owned();
    (description, body)
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(ch);
        }
    }
    out
}
