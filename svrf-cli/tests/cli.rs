use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("svrf-parser")
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn translate_to_stdout() {
    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("translate")
        .arg(fixture_path("sample.svrf"))
        .arg("--stdout");

    let output_pred = predicate::str::contains("// ICV DRC rules translated from SVRF")
        .and(predicate::str::contains("run_options {"))
        .and(predicate::str::contains("LAYER M1 = 31;"))
        .and(predicate::str::contains("rule m1_width {"));

    cmd.assert()
        .success()
        .stdout(output_pred)
        .stderr(predicate::str::contains("Coverage:"));
}

#[test]
fn translate_reports_manual_rules() {
    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("translate")
        .arg(fixture_path("sample.svrf"))
        .arg("--stdout");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("MANUAL TRANSLATION REQUIRED"))
        .stderr(predicate::str::contains(
            "Rules needing manual translation: CUSTOM_CHECK",
        ));
}

#[test]
fn translate_header_overrides() {
    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("translate")
        .arg(fixture_path("sample.svrf"))
        .arg("--stdout")
        .arg("--technology")
        .arg("N7")
        .arg("--process")
        .arg("7nm");

    cmd.assert().success().stdout(
        predicate::str::contains("// Technology: N7")
            .and(predicate::str::contains("// Process Node: 7nm")),
    );
}

#[test]
fn translate_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("deck.rs");

    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("translate")
        .arg(fixture_path("sample.svrf"))
        .arg("-o")
        .arg(&out);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Output written to"));

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("// ICV DRC rules translated from SVRF"));
}

#[test]
fn translate_default_output_uses_format_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("deck.svrf");
    fs::write(&input, "LAYER M1 31\nW { INTERNAL1 M1 < 0.1 }\n").unwrap();

    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("translate").arg(&input).arg("--format").arg("json");
    cmd.assert().success();

    let written = fs::read_to_string(dir.path().join("deck.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["rules"][0]["category"]["kind"], "width");
}

#[test]
fn translate_unknown_format_fails() {
    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("translate")
        .arg(fixture_path("sample.svrf"))
        .arg("--format")
        .arg("calibre")
        .arg("--stdout");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Available formats: icv, json, yaml"));
}

#[test]
fn missing_input_fails() {
    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("translate")
        .arg("/nonexistent/deck.svrf")
        .arg("--stdout");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("/nonexistent/deck.svrf"));
}

#[test]
fn config_file_sets_header() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("svrf.toml");
    fs::write(&config, "[translate]\ntechnology = \"FinFET\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("translate")
        .arg(fixture_path("sample.svrf"))
        .arg("--stdout")
        .arg("--config")
        .arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("// Technology: FinFET"));
}

#[test]
fn inspect_rules_listing() {
    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("inspect").arg(fixture_path("sample.svrf"));

    cmd.assert().success().stdout(
        predicate::str::contains("M1_WIDTH  width  M1  < 0.23")
            .and(predicate::str::contains("CUSTOM_CHECK  unknown")),
    );
}

#[test]
fn inspect_tokens() {
    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("inspect")
        .arg(fixture_path("sample.svrf"))
        .arg("-f")
        .arg("token-simple");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Layer LAYER"));
}

#[test]
fn inspect_rejects_unknown_transform() {
    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("inspect")
        .arg(fixture_path("sample.svrf"))
        .arg("-f")
        .arg("html");

    cmd.assert().failure();
}

#[test]
fn stats_with_analysis() {
    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("stats")
        .arg(fixture_path("sample.svrf"))
        .arg("--analyze")
        .arg("--rules")
        .arg("width");

    cmd.assert().success().stdout(
        predicate::str::contains("Layers:")
            .and(predicate::str::contains("Width rules"))
            .and(predicate::str::contains("M1_WIDTH")),
    );
}

#[test]
fn list_formats() {
    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("list-formats");

    cmd.assert().success().stdout(
        predicate::str::contains("icv")
            .and(predicate::str::contains("yaml"))
            .and(predicate::str::contains("token-json")),
    );
}

#[test]
fn translate_strict_rejects_deck_with_errors() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.svrf");
    fs::write(&input, "LAYER M1 31\nW { INTERNAL1 M1 < 0.1\n").unwrap();

    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("translate").arg(&input).arg("--stdout");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("rule w {"));

    let mut cmd = cargo_bin_cmd!("svrf");
    cmd.arg("translate").arg(&input).arg("--stdout").arg("--strict");
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unclosed-block"));
}
