// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Document structure checks: DOCTYPE, root elements, form presence.

use crate::checks::{found, Check, CheckFailure, Outcome};
use crate::config::Config;
use crate::document::Document;
use crate::outcome::CheckGroup;
use regex::Regex;

/// `<!DOCTYPE html>` must open the raw source
pub struct DoctypeCheck;

impl Check for DoctypeCheck {
    fn id(&self) -> String {
        "structure.doctype".to_string()
    }

    fn group(&self) -> CheckGroup {
        CheckGroup::Structure
    }

    fn description(&self) -> String {
        "document starts with <!DOCTYPE html>".to_string()
    }

    fn evaluate(&self, document: &Document) -> Outcome {
        let doctype = Regex::new(r"(?i)^<!doctype html>").expect("valid regex");
        let head = document.source().trim_start_matches('\u{feff}').trim_start();

        if doctype.is_match(head) {
            Ok(())
        } else {
            let first_line = head.lines().next().unwrap_or("");
            Err(CheckFailure::new(format!(
                "document does not start with <!DOCTYPE html> (starts with `{}`)",
                truncate(first_line, 40)
            )))
        }
    }
}

/// An element with the given tag must exist
pub struct ElementPresentCheck {
    pub tag: String,
}

impl Check for ElementPresentCheck {
    fn id(&self) -> String {
        format!("structure.element.{}", self.tag)
    }

    fn group(&self) -> CheckGroup {
        CheckGroup::Structure
    }

    fn description(&self) -> String {
        format!("document has a <{}> element", self.tag)
    }

    fn evaluate(&self, document: &Document) -> Outcome {
        found(document.find_first(&self.tag)?, || format!("<{}>", self.tag))?;
        Ok(())
    }
}

/// At least one form must exist
pub struct FormPresentCheck {
    pub selector: String,
}

impl Check for FormPresentCheck {
    fn id(&self) -> String {
        "structure.form".to_string()
    }

    fn group(&self) -> CheckGroup {
        CheckGroup::Structure
    }

    fn description(&self) -> String {
        format!("document contains a form ({})", self.selector)
    }

    fn evaluate(&self, document: &Document) -> Outcome {
        found(document.find_first(&self.selector)?, || {
            format!("form element `{}`", self.selector)
        })?;
        Ok(())
    }
}

/// Structure checks for a profile
pub fn checks(config: &Config) -> Vec<Box<dyn Check>> {
    let mut checks: Vec<Box<dyn Check>> = Vec::new();

    if config.structure.require_doctype {
        checks.push(Box::new(DoctypeCheck));
    }
    for tag in &config.structure.required_elements {
        checks.push(Box::new(ElementPresentCheck { tag: tag.clone() }));
    }
    checks.push(Box::new(FormPresentCheck {
        selector: config.structure.form_selector.clone(),
    }));

    checks
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{}...", cut)
    }
}
