// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for formbot

use formbot::checks;
use formbot::config::{load_config, Config};
use formbot::report::{generate_report, OutputFormat};
use formbot::{scanner, CheckReport, FormbotError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn scan_fixture(name: &str) -> CheckReport {
    let path = scanner::resolve_document_path(&fixtures_dir(), Some(Path::new(name)), &Config::default());
    scanner::scan_file(&path, &Config::default()).expect("scan should succeed")
}

fn failing_ids(report: &CheckReport) -> Vec<&str> {
    report.failures().iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_valid_document_passes_everything() {
    let report = scan_fixture("index.html");

    assert!(
        report.passed(),
        "valid fixture should pass, failing: {:?}",
        failing_ids(&report)
    );
    assert_eq!(report.len(), checks::battery(&Config::default()).len());
    assert_eq!(report.len(), 36);
}

#[test]
fn test_default_document_name_resolves() {
    let config = Config::default();
    let path = scanner::resolve_document_path(&fixtures_dir(), None, &config);
    assert!(path.ends_with("tests/fixtures/index.html"));
    assert!(scanner::scan_file(&path, &config).unwrap().passed());
}

#[test]
fn test_runs_are_idempotent() {
    let first = scan_fixture("duplicate_tabindex.html");
    let second = scan_fixture("duplicate_tabindex.html");
    assert_eq!(first.results, second.results);
}

#[test]
fn test_missing_select_does_not_hide_other_checks() {
    let report = scan_fixture("missing_gender.html");

    assert!(!report.get("field.gender.exists").unwrap().passed());
    assert!(!report.get("field.gender.tabindex").unwrap().passed());

    // the label is still there
    assert!(report.get("field.gender.label").unwrap().passed());
    assert!(report.get("field.gender.label.accesskey").unwrap().passed());

    for result in report.results.iter().filter(|r| r.id.starts_with("field.address.")) {
        assert!(result.passed(), "{} should pass", result.id);
    }
    for result in report.results.iter().filter(|r| r.id.starts_with("controls.")) {
        assert!(result.passed(), "{} should pass", result.id);
    }

    let inside = report.get("integration.inside-form").unwrap();
    assert_eq!(inside.message.as_deref(), Some("select#gender not found"));
    assert!(!report.get("integration.labels-paired").unwrap().passed());
    assert!(report.get("a11y.tabindex.count").unwrap().passed());
}

#[test]
fn test_duplicate_tabindex_only_fails_uniqueness() {
    let report = scan_fixture("duplicate_tabindex.html");

    assert_eq!(failing_ids(&report), vec!["a11y.tabindex.unique"]);
    assert!(report.get("a11y.tabindex.count").unwrap().passed());
    let message = report.get("a11y.tabindex.unique").unwrap().message.clone().unwrap();
    assert!(message.contains("tabindex=\"3\" used 2 times"));
}

#[test]
fn test_missing_doctype_only_fails_doctype() {
    let report = scan_fixture("no_doctype.html");
    assert_eq!(failing_ids(&report), vec!["structure.doctype"]);
}

#[test]
fn test_missing_document_is_fatal() {
    let result = scanner::scan_file(&fixtures_dir().join("absent.html"), &Config::default());
    match result {
        Err(FormbotError::MissingFile { path }) => assert!(path.ends_with("absent.html")),
        other => panic!("expected MissingFile, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn test_empty_document_still_reports_every_check() {
    let config = Config::default();
    let report = scanner::scan_source(None, "", &config);

    assert_eq!(report.len(), checks::battery(&config).len());
    assert!(!report.passed());
    // html5ever synthesizes the root elements
    assert!(report.get("structure.element.body").unwrap().passed());
    assert!(!report.get("structure.form").unwrap().passed());
    assert!(!report.get("controls.submit.text").unwrap().passed());
}

#[test]
fn test_custom_profile_changes_expectations() {
    let dir = TempDir::new().unwrap();
    let profile = dir.path().join("formbot.toml");
    std::fs::write(
        &profile,
        r#"
[[fields]]
id = "gender"
kind = "select"
name = "gender"
tabindex = "5"
label_accesskey = "g"

[[buttons]]
type = "submit"
accesskey = "s"
tabindex = "8"

[accessibility]
min_accesskeys = 10
"#,
    )
    .unwrap();

    let config = load_config(&profile).unwrap();
    let path = fixtures_dir().join("index.html");
    let report = scanner::scan_file(&path, &config).unwrap();

    assert_eq!(
        failing_ids(&report),
        vec![
            "field.gender.tabindex",
            "controls.submit.accesskey",
            "a11y.accesskey.count",
        ]
    );
    assert!(report.get("field.address.exists").is_none());
    assert!(report.get("controls.reset.exists").is_none());
}

#[test]
fn test_grade_fixtures_directory() {
    let reports = scanner::scan_directory(&fixtures_dir(), &Config::default()).unwrap();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].passed());
}

#[test]
fn test_reports_render_in_every_format() {
    let report = scan_fixture("missing_gender.html");

    let text = generate_report(&report, OutputFormat::Text);
    assert!(text.contains("[FAIL] field.gender.exists"));
    assert!(text.contains("RESULT: FAIL"));

    let json = generate_report(&report, OutputFormat::Json);
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("JSON report should be valid JSON");
    assert_eq!(parsed["results"].as_array().unwrap().len(), report.len());

    let xml = generate_report(&report, OutputFormat::Junit);
    assert!(xml.contains("<testcase name=\"field.gender.exists\""));
    assert!(xml.contains("<failure message="));
}
