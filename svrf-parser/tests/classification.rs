//! Category tables for the standard classifier

use rstest::rstest;
use svrf_parser::{ComparisonOp, RuleCategory, STANDARD_CLASSIFIER};

#[rstest]
#[case("INTERNAL1 M1 < 0.1", "width")]
#[case("INTERNAL2 POLY < 0.18", "length")]
#[case("EXTERNAL1 M1 < 0.2", "spacing")]
#[case("EXTERNAL M1 < 0.2", "spacing")]
#[case("EXTERNAL M1 M2 < 0.3", "inter_layer_spacing")]
#[case("AREA M1 < 0.2", "area")]
#[case("DENSITY M1 WINDOW 100 100 < 0.2", "density")]
#[case("VIA1 NOT INSIDE M1 BY >= 0.05", "enclosure")]
#[case("ANTENNA M1 GATE MAX RATIO 400", "antenna")]
#[case("RECTANGLE M2 LENGTH >= 1.0 WIDTH == 0.28", "pattern_rectangle")]
#[case("EXTERNAL1 M1 < 0.08 SAME_MASK", "same_mask_spacing")]
#[case("INTERNAL1 GATE > 0.09 OPPOSITE", "opposite_constraint")]
#[case("OFFGRID M1 0.005", "unknown")]
#[case("", "unknown")]
fn test_single_shape_categories(#[case] body: &str, #[case] expected: &str) {
    let rule = STANDARD_CLASSIFIER.classify("R", body);
    assert_eq!(rule.category.name(), expected, "body: {}", body);
}

#[rstest]
#[case("RECTANGLE M1 LENGTH > 0.5 WIDTH < 0.1 INTERNAL1 M1 < 0.1", "pattern_rectangle")]
#[case("INTERNAL1 M1 < 0.1 RECTANGLE M1 LENGTH > 0.5 WIDTH < 0.1", "pattern_rectangle")]
#[case("VIA1 NOT INSIDE M1 BY >= 0.05 INTERNAL1 VIA1 < 0.1", "enclosure")]
#[case("ANTENNA M1 GATE MAX RATIO 400 AREA M1 < 1", "antenna")]
#[case("EXTERNAL1 M1 < 0.08 SAME_MASK INTERNAL1 M1 < 0.1", "same_mask_spacing")]
#[case("AREA M1 < 0.2 INTERNAL1 M1 < 0.1", "area")]
#[case("INTERNAL2 M1 < 0.2 INTERNAL1 M1 < 0.1", "length")]
#[case("SAME_MASK EXTERNAL1 M1 < 0.08", "same_mask_spacing")]
#[case("OPPOSITE INTERNAL1 GATE > 0.09", "opposite_constraint")]
#[case("INTERNAL1 M1 < 0.1 M1 NOT INSIDE M2", "width")]
#[case("AREA M1 < 0.5 EXTERNAL", "area")]
#[case("RECTANGLE M1 INTERNAL1 M1 < 0.1", "width")]
#[case("ANTENNA M1 GATE MAX RATIO DENSITY M1 WINDOW 10 10 > 0.3", "density")]
#[case("DENSITY M1 < 0.2 WINDOW", "unknown")]
fn test_precedence(#[case] body: &str, #[case] expected: &str) {
    let rule = STANDARD_CLASSIFIER.classify("R", body);
    assert_eq!(rule.category.name(), expected, "body: {}", body);
}

#[rstest]
#[case("INTERNAL1 M1 < 0.1", ComparisonOp::Lt)]
#[case("INTERNAL1 M1 <= 0.1", ComparisonOp::Le)]
#[case("INTERNAL1 M1 > 0.1", ComparisonOp::Gt)]
#[case("INTERNAL1 M1 >= 0.1", ComparisonOp::Ge)]
#[case("INTERNAL1 M1 == 0.1", ComparisonOp::Eq)]
fn test_operators(#[case] body: &str, #[case] op: ComparisonOp) {
    let rule = STANDARD_CLASSIFIER.classify("W", body);
    assert_eq!(rule.operator, Some(op));
    assert_eq!(rule.threshold, 0.1);
}

#[test]
fn test_density_window() {
    let rule = STANDARD_CLASSIFIER.classify("D", "DENSITY M1 WINDOW 50 25.5 > 0.3");
    assert_eq!(
        rule.category,
        RuleCategory::Density {
            window_x: 50.0,
            window_y: 25.5
        }
    );
    assert_eq!(rule.primary_layer, "M1");
    assert_eq!(rule.operator, Some(ComparisonOp::Gt));
}

#[test]
fn test_negative_threshold_loses_sign() {
    // `-` is not lexable, so the parser sees `< 1`
    let result = svrf_parser::SourceLoader::from_string("W { INTERNAL1 M1 < -1 }")
        .parse()
        .unwrap();
    assert_eq!(result.rules[0].threshold, 1.0);
}

#[test]
fn test_classification_is_independent_per_block() {
    let blocks = vec![
        svrf_parser::RuleBlock::new("A", "INTERNAL1 M1 < 0.1", 1),
        svrf_parser::RuleBlock::new("B", "garbage", 2),
        svrf_parser::RuleBlock::new("C", "AREA M1 < 1", 3),
    ];
    let all = STANDARD_CLASSIFIER.classify_all(&blocks);
    let single = STANDARD_CLASSIFIER.classify_block(&blocks[2]);
    assert_eq!(all[2], single);
    assert_eq!(all.len(), 3);
}
