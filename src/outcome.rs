// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Check outcomes and the per-document report that aggregates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Group a check belongs to, in battery order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckGroup {
    /// DOCTYPE and root elements
    Structure,
    /// Per-field conformance
    Fields,
    /// Submit/reset buttons
    Controls,
    /// Document-wide accesskey/tabindex invariants
    Accessibility,
    /// Containment and label pairing
    Integration,
}

impl CheckGroup {
    /// All groups in battery order
    pub const ALL: [CheckGroup; 5] = [
        CheckGroup::Structure,
        CheckGroup::Fields,
        CheckGroup::Controls,
        CheckGroup::Accessibility,
        CheckGroup::Integration,
    ];

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckGroup::Structure => "structure",
            CheckGroup::Fields => "fields",
            CheckGroup::Controls => "controls",
            CheckGroup::Accessibility => "accessibility",
            CheckGroup::Integration => "integration",
        }
    }
}

impl std::fmt::Display for CheckGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckGroup::Structure => write!(f, "Document Structure"),
            CheckGroup::Fields => write!(f, "Form Fields"),
            CheckGroup::Controls => write!(f, "Action Controls"),
            CheckGroup::Accessibility => write!(f, "Accessibility"),
            CheckGroup::Integration => write!(f, "Form Integration"),
        }
    }
}

/// Pass/fail status of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// Result of running one check against one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Stable check identifier (e.g., "field.gender.tabindex")
    pub id: String,
    /// Group the check belongs to
    pub group: CheckGroup,
    /// What the check expects
    pub description: String,
    /// Pass or fail
    pub status: CheckStatus,
    /// Which expectation was violated, for failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckResult {
    /// A passing result
    pub fn pass(id: &str, group: CheckGroup, description: &str) -> Self {
        Self {
            id: id.to_string(),
            group,
            description: description.to_string(),
            status: CheckStatus::Pass,
            message: None,
        }
    }

    /// A failing result with the violated expectation
    pub fn fail(id: &str, group: CheckGroup, description: &str, message: &str) -> Self {
        Self {
            id: id.to_string(),
            group,
            description: description.to_string(),
            status: CheckStatus::Fail,
            message: Some(message.to_string()),
        }
    }

    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}

/// Counts for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

/// All check results for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Document the checks ran against
    pub source: Option<PathBuf>,
    /// When the run finished
    pub generated_at: DateTime<Utc>,
    /// Results in battery order
    pub results: Vec<CheckResult>,
}

impl CheckReport {
    /// Create an empty report for a document
    pub fn new(source: Option<PathBuf>) -> Self {
        Self {
            source,
            generated_at: Utc::now(),
            results: Vec::new(),
        }
    }

    /// Add a result
    pub fn add(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    /// Look up a result by check id
    pub fn get(&self, id: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.id == id)
    }

    /// Results belonging to a group
    pub fn by_group(&self, group: CheckGroup) -> Vec<&CheckResult> {
        self.results.iter().filter(|r| r.group == group).collect()
    }

    /// All failing results
    pub fn failures(&self) -> Vec<&CheckResult> {
        self.results.iter().filter(|r| !r.passed()).collect()
    }

    /// Aggregate verdict: every check passed
    pub fn passed(&self) -> bool {
        self.results.iter().all(CheckResult::passed)
    }

    pub fn summary(&self) -> Summary {
        let passed = self.results.iter().filter(|r| r.passed()).count();
        Summary {
            total: self.results.len(),
            passed,
            failed: self.results.len() - passed,
        }
    }

    /// Total count
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Is empty
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Display name of the checked document
    pub fn source_label(&self) -> String {
        match &self.source {
            Some(p) => p.display().to_string(),
            None => "<inline>".to_string(),
        }
    }
}
