//! Human-readable reports for `stats` and the stderr output of `translate`

use svrf_config::ReportConfig;
use svrf_parser::svrf::analysis::{PotentialIssues, Statistics, RESTRICTIVE_THRESHOLD};
use svrf_parser::{ClassifiedRule, Diagnostic};

/// Diagnostics, capped per the report settings
pub fn diagnostics(diagnostics: &[Diagnostic], report: &ReportConfig) -> String {
    let shown = report.diagnostic_limit(diagnostics.len());
    let mut out = String::new();
    for diagnostic in &diagnostics[..shown] {
        out.push_str(&format!("{}\n", diagnostic));
    }
    if shown < diagnostics.len() && report.show_diagnostics {
        out.push_str(&format!(
            "... {} more diagnostics not shown\n",
            diagnostics.len() - shown
        ));
    }
    out
}

pub fn statistics(stats: &Statistics) -> String {
    let mut out = String::new();
    out.push_str("Layers:\n");
    out.push_str(&format!("  total: {}\n", stats.total_layers));
    out.push_str(&format!("  primitive: {}\n", stats.primitive_layers));
    out.push_str(&format!("  derived: {}\n", stats.derived_layers));
    if stats.unresolved_layers > 0 {
        out.push_str(&format!("  unresolved: {}\n", stats.unresolved_layers));
    }
    if stats.redefined_layers > 0 {
        out.push_str(&format!("  redefinitions: {}\n", stats.redefined_layers));
    }
    out.push_str("Rules:\n");
    out.push_str(&format!("  total: {}\n", stats.total_rules));
    for (category, count) in &stats.rules_by_category {
        out.push_str(&format!("  {}: {}\n", category, count));
    }
    out.push_str(&format!("  coverage: {:.1}%\n", stats.coverage()));
    out.push_str(&format!("Includes: {}\n", stats.includes));
    out.push_str(&format!(
        "Diagnostics: {} errors, {} warnings\n",
        stats.errors, stats.warnings
    ));
    out
}

pub fn rule_table(title: &str, rules: &[&ClassifiedRule]) -> String {
    let mut out = format!("{} ({}):\n", title, rules.len());
    for rule in rules {
        let constraint = match rule.operator {
            Some(op) => format!("{} {}", op, rule.threshold),
            None => "?".to_string(),
        };
        out.push_str(&format!(
            "  {:<24} {:<12} {}\n",
            rule.name,
            rule.layers().join(","),
            constraint
        ));
    }
    out
}

pub fn issues(issues: &PotentialIssues) -> String {
    if issues.is_empty() {
        return "Potential issues: none\n".to_string();
    }
    let mut out = String::from("Potential issues:\n");
    if !issues.unused_layers.is_empty() {
        out.push_str(&format!(
            "  layers without rules: {}\n",
            issues.unused_layers.join(", ")
        ));
    }
    if !issues.restrictive_rules.is_empty() {
        out.push_str(&format!(
            "  {} very restrictive rules (< {}): {}\n",
            issues.restrictive_rules.len(),
            RESTRICTIVE_THRESHOLD,
            issues.restrictive_rules.join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use svrf_parser::SourceLoader;

    fn report_config(max: usize) -> ReportConfig {
        ReportConfig {
            show_diagnostics: true,
            max_diagnostics: max,
            show_summary: true,
            list_manual_rules: true,
        }
    }

    #[test]
    fn test_diagnostics_are_capped() {
        let result = SourceLoader::from_string("A\nB\nC\n").parse().unwrap();
        let out = diagnostics(&result.diagnostics, &report_config(2));
        assert_eq!(out.lines().count(), 3);
        assert!(out.ends_with("... 1 more diagnostics not shown\n"));
    }

    #[test]
    fn test_statistics_lists_categories() {
        let result = SourceLoader::from_string("LAYER M1 1\nW { INTERNAL1 M1 < 0.1 }")
            .parse()
            .unwrap();
        let out = statistics(&result.statistics());
        assert!(out.contains("  width: 1\n"));
        assert!(out.contains("  coverage: 100.0%\n"));
    }

    #[test]
    fn test_issues_none() {
        assert_eq!(issues(&PotentialIssues::default()), "Potential issues: none\n");
    }
}
