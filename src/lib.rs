// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Formbot - HTML form document conformance checker
//!
//! Part of the gitbot-fleet ecosystem. Formbot loads one HTML document,
//! parses it once, and runs an ordered battery of independent checks
//! against it. Every check reports on its own; one failure never hides
//! another.
//!
//! ## Check groups
//!
//! - **Structure**: DOCTYPE, `html`/`head`/`body`, a `form`
//! - **Fields**: id, `name`, `required`, `tabindex`, options, rows/cols, label and its `accesskey`
//! - **Controls**: submit/reset buttons with `accesskey`, `tabindex` and text
//! - **Accessibility**: enough `accesskey`/`tabindex` attributes, no duplicates
//! - **Integration**: everything inside the form, labels paired with fields
//!
//! The literals each check expects come from a [`Config`] profile whose
//! defaults are the "advanced form elements" assignment.

pub mod checks;
pub mod config;
pub mod document;
pub mod error;
pub mod outcome;
pub mod report;
pub mod scanner;

pub use checks::{run_checks, Check, CheckFailure, Outcome};
pub use config::Config;
pub use document::Document;
pub use error::{FormbotError, Result};
pub use outcome::{CheckGroup, CheckReport, CheckResult, CheckStatus};
