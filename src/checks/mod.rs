// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Conformance checks.
//!
//! The battery is built from a [`Config`] and runs in a fixed order:
//! structure, fields, controls, accessibility, integration. Each check
//! is an independent predicate over a shared, read-only [`Document`];
//! a failing check yields a [`CheckFailure`] and never stops the run.

pub mod accessibility;
pub mod controls;
pub mod fields;
pub mod integration;
pub mod structure;

use crate::config::Config;
use crate::document::{self, Document, Element};
use crate::error::FormbotError;
use crate::outcome::{CheckGroup, CheckReport, CheckResult};
use std::path::Path;
use tracing::{debug, info};

/// Why a check did not pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    pub message: String,
}

impl CheckFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

// A selector that fails to compile fails the check that built it.
impl From<FormbotError> for CheckFailure {
    fn from(err: FormbotError) -> Self {
        Self::new(err.to_string())
    }
}

/// Outcome of evaluating one check
pub type Outcome = std::result::Result<(), CheckFailure>;

/// Trait implemented by all checks
pub trait Check: Send + Sync {
    /// Stable identifier used in reports
    fn id(&self) -> String;

    /// Group this check reports under
    fn group(&self) -> CheckGroup;

    /// What the check expects, in one line
    fn description(&self) -> String;

    /// Evaluate against a document
    fn evaluate(&self, document: &Document) -> Outcome;
}

/// Build the full check battery for a profile
pub fn battery(config: &Config) -> Vec<Box<dyn Check>> {
    let mut checks: Vec<Box<dyn Check>> = Vec::new();
    checks.extend(structure::checks(config));
    checks.extend(fields::checks(config));
    checks.extend(controls::checks(config));
    checks.extend(accessibility::checks(config));
    checks.extend(integration::checks(config));
    checks
}

/// Run the profile's battery against a document
pub fn run_checks(document: &Document, config: &Config) -> CheckReport {
    run_battery(document, &battery(config))
}

/// Run every check in order, recording one result per check
pub fn run_battery(document: &Document, checks: &[Box<dyn Check>]) -> CheckReport {
    let mut report = CheckReport::new(document.path().map(Path::to_path_buf));

    for check in checks {
        let id = check.id();
        let description = check.description();
        let result = match check.evaluate(document) {
            Ok(()) => {
                debug!(check = %id, "passed");
                CheckResult::pass(&id, check.group(), &description)
            }
            Err(failure) => {
                debug!(check = %id, reason = %failure, "failed");
                CheckResult::fail(&id, check.group(), &description, &failure.message)
            }
        };
        report.add(result);
    }

    let summary = report.summary();
    info!(
        "{}: {}/{} checks passed",
        report.source_label(),
        summary.passed,
        summary.total
    );

    report
}

/// Turn a lookup that found nothing into a failure
pub(crate) fn found<'a>(
    element: Option<Element<'a>>,
    what: impl FnOnce() -> String,
) -> std::result::Result<Element<'a>, CheckFailure> {
    element.ok_or_else(|| CheckFailure::new(format!("{} not found", what())))
}

/// Attribute must be present and equal `expected`
pub(crate) fn expect_attr(element: Element<'_>, name: &str, expected: &str, what: &str) -> Outcome {
    match document::attr(element, name) {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(CheckFailure::new(format!(
            "{} has {}=\"{}\", expected {}=\"{}\"",
            what, name, actual, name, expected
        ))),
        None => Err(CheckFailure::new(format!(
            "{} is missing the {} attribute (expected {}=\"{}\")",
            what, name, name, expected
        ))),
    }
}
