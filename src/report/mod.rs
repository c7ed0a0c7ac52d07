// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Report generation for check results.
//!
//! Supports multiple output formats:
//! - Text: per-group PASS/FAIL listing with the violated expectation
//! - JSON: structured results for programmatic consumption
//! - JUnit: XML test report for CI test harnesses

use crate::outcome::{CheckGroup, CheckReport, CheckResult};
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// JUnit XML
    Junit,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Junit => write!(f, "junit"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "junit" | "xml" => Ok(OutputFormat::Junit),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Generate a report for one document
pub fn generate_report(report: &CheckReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(report),
        OutputFormat::Json => to_json(report),
        OutputFormat::Junit => wrap_testsuites(&[report], junit_suites(report, None)),
    }
}

/// Generate one combined report for several documents
pub fn generate_batch_report(reports: &[CheckReport], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_batch(reports),
        OutputFormat::Json => to_json(&BatchReport::new(reports)),
        OutputFormat::Junit => {
            let suites: String = reports
                .iter()
                .map(|r| junit_suites(r, Some(r.source_label().as_str())))
                .collect();
            let refs: Vec<&CheckReport> = reports.iter().collect();
            wrap_testsuites(&refs, suites)
        }
    }
}

fn generate_text_report(report: &CheckReport) -> String {
    let mut output = String::new();

    output.push_str("=== Formbot Conformance Report ===\n");
    output.push_str(&format!("Document: {}\n\n", report.source_label()));

    for group in CheckGroup::ALL {
        let results = report.by_group(group);
        if results.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ---\n", group));
        for result in results {
            output.push_str(&format!("[{}] {}: {}\n", result.status, result.id, result.description));
            if let Some(ref message) = result.message {
                output.push_str(&format!("       {}\n", message));
            }
        }
        output.push('\n');
    }

    let summary = report.summary();
    output.push_str(&format!(
        "{} check(s): {} passed, {} failed\n",
        summary.total, summary.passed, summary.failed
    ));

    if report.passed() {
        output.push_str("RESULT: PASS\n");
    } else {
        output.push_str("RESULT: FAIL\n");
    }

    output
}

fn generate_text_batch(reports: &[CheckReport]) -> String {
    let mut output = String::new();

    for report in reports {
        output.push_str(&generate_text_report(report));
        output.push('\n');
    }

    let passed = reports.iter().filter(|r| r.passed()).count();
    output.push_str(&format!(
        "=== {} document(s): {} passed, {} failed ===\n",
        reports.len(),
        passed,
        reports.len() - passed
    ));
    for report in reports.iter().filter(|r| !r.passed()) {
        output.push_str(&format!(
            "  FAIL {} ({} failing check(s))\n",
            report.source_label(),
            report.summary().failed
        ));
    }

    output
}

/// JSON envelope for batch runs
#[derive(Debug, Serialize)]
struct BatchReport<'a> {
    documents: usize,
    passed: usize,
    failed: usize,
    reports: &'a [CheckReport],
}

impl<'a> BatchReport<'a> {
    fn new(reports: &'a [CheckReport]) -> Self {
        let passed = reports.iter().filter(|r| r.passed()).count();
        Self {
            documents: reports.len(),
            passed,
            failed: reports.len() - passed,
            reports,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize report: {}\"}}", e)
    })
}

fn wrap_testsuites(reports: &[&CheckReport], suites: String) -> String {
    let total: usize = reports.iter().map(|r| r.len()).sum();
    let failed: usize = reports.iter().map(|r| r.summary().failed).sum();

    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str(&format!(
        "<testsuites name=\"formbot\" tests=\"{}\" failures=\"{}\" errors=\"0\">\n",
        total, failed
    ));
    output.push_str(&suites);
    output.push_str("</testsuites>\n");
    output
}

/// One `<testsuite>` per group; `prefix` distinguishes documents in batch runs
fn junit_suites(report: &CheckReport, prefix: Option<&str>) -> String {
    let mut output = String::new();

    for group in CheckGroup::ALL {
        let results = report.by_group(group);
        if results.is_empty() {
            continue;
        }

        let suite_name = match prefix {
            Some(p) => format!("{}::{}", p, group.as_str()),
            None => group.as_str().to_string(),
        };
        let failures = results.iter().filter(|r| !r.passed()).count();

        output.push_str(&format!(
            "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"0\">\n",
            escape_xml(&suite_name),
            results.len(),
            failures
        ));
        for result in results {
            output.push_str(&junit_testcase(result, group));
        }
        output.push_str("  </testsuite>\n");
    }

    output
}

fn junit_testcase(result: &CheckResult, group: CheckGroup) -> String {
    let open = format!(
        "    <testcase name=\"{}\" classname=\"formbot.{}\"",
        escape_xml(&result.id),
        group.as_str()
    );

    match &result.message {
        Some(message) if !result.passed() => format!(
            "{}>\n      <failure message=\"{}\">{}</failure>\n    </testcase>\n",
            open,
            escape_xml(message),
            escape_xml(&result.description)
        ),
        _ => format!("{} />\n", open),
    }
}

fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            c => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_report(fail: bool) -> CheckReport {
        let mut report = CheckReport::new(Some(PathBuf::from("student/index.html")));
        report.add(CheckResult::pass(
            "structure.doctype",
            CheckGroup::Structure,
            "document starts with <!DOCTYPE html>",
        ));
        if fail {
            report.add(CheckResult::fail(
                "field.gender.tabindex",
                CheckGroup::Fields,
                "select#gender has tabindex=\"6\"",
                "select#gender has tabindex=\"5\", expected tabindex=\"6\"",
            ));
        }
        report
    }

    #[test]
    fn test_text_report_pass() {
        let report = generate_report(&sample_report(false), OutputFormat::Text);
        assert!(report.contains("Formbot Conformance Report"));
        assert!(report.contains("[PASS] structure.doctype"));
        assert!(report.contains("RESULT: PASS"));
    }

    #[test]
    fn test_text_report_fail() {
        let report = generate_report(&sample_report(true), OutputFormat::Text);
        assert!(report.contains("--- Form Fields ---"));
        assert!(report.contains("[FAIL] field.gender.tabindex"));
        assert!(report.contains("expected tabindex=\"6\""));
        assert!(report.contains("2 check(s): 1 passed, 1 failed"));
        assert!(report.contains("RESULT: FAIL"));
    }

    #[test]
    fn test_json_report() {
        let report = generate_report(&sample_report(true), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert!(parsed["results"].is_array());
        assert_eq!(parsed["results"][1]["status"], "fail");
    }

    #[test]
    fn test_junit_report() {
        let report = generate_report(&sample_report(true), OutputFormat::Junit);
        assert!(report.starts_with("<?xml"));
        assert!(report.contains("<testsuites name=\"formbot\" tests=\"2\" failures=\"1\""));
        assert!(report.contains("<testsuite name=\"fields\" tests=\"1\" failures=\"1\""));
        assert!(report.contains("<testcase name=\"structure.doctype\" classname=\"formbot.structure\" />"));
        assert!(report.contains("tabindex=&quot;5&quot;"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml("<a href=\"x\">&'"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&apos;"
        );
    }

    #[test]
    fn test_batch_reports() {
        let reports = vec![sample_report(false), sample_report(true)];

        let text = generate_batch_report(&reports, OutputFormat::Text);
        assert!(text.contains("2 document(s): 1 passed, 1 failed"));
        assert!(text.contains("FAIL student/index.html (1 failing check(s))"));

        let json = generate_batch_report(&reports, OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(parsed["documents"], 2);
        assert_eq!(parsed["failed"], 1);

        let xml = generate_batch_report(&reports, OutputFormat::Junit);
        assert!(xml.contains("tests=\"3\" failures=\"1\""));
        assert!(xml.contains("name=\"student/index.html::structure\""));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("junit".parse::<OutputFormat>().unwrap(), OutputFormat::Junit);
        assert!("sarif".parse::<OutputFormat>().is_err());
    }
}
