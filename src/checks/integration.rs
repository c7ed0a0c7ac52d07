// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration checks: fields and buttons live inside the form, labels pair with fields.

use crate::checks::controls::locate_button;
use crate::checks::fields::{locate_field, locate_label};
use crate::checks::{found, Check, CheckFailure, Outcome};
use crate::config::Config;
use crate::document::{self, attr_selector, Document};
use crate::outcome::CheckGroup;

/// Every configured field and button is a descendant of the form
pub struct InsideFormCheck {
    pub config: Config,
}

impl Check for InsideFormCheck {
    fn id(&self) -> String {
        "integration.inside-form".to_string()
    }

    fn group(&self) -> CheckGroup {
        CheckGroup::Integration
    }

    fn description(&self) -> String {
        "all checked fields and buttons are inside the form".to_string()
    }

    fn evaluate(&self, document: &Document) -> Outcome {
        let selector = &self.config.structure.form_selector;
        let form = found(document.find_first(selector)?, || {
            format!("form element `{}`", selector)
        })?;

        let mut problems = Vec::new();

        for rule in &self.config.fields {
            let subject = format!("{}#{}", rule.kind.tag(), rule.id);
            match locate_field(document, rule)? {
                Some(field) if document::contains(form, field) => {}
                Some(_) => problems.push(format!("{} is outside the form", subject)),
                None => problems.push(format!("{} not found", subject)),
            }
        }

        for rule in &self.config.buttons {
            let subject = attr_selector("button", "type", &rule.button_type);
            match locate_button(document, rule)? {
                Some(button) if document::contains(form, button) => {}
                Some(_) => problems.push(format!("{} is outside the form", subject)),
                None => problems.push(format!("{} not found", subject)),
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CheckFailure::new(problems.join("; ")))
        }
    }
}

/// Every configured field has both its `label[for=id]` and the field itself
pub struct LabelsPairedCheck {
    pub config: Config,
}

impl Check for LabelsPairedCheck {
    fn id(&self) -> String {
        "integration.labels-paired".to_string()
    }

    fn group(&self) -> CheckGroup {
        CheckGroup::Integration
    }

    fn description(&self) -> String {
        "every label is paired with its field".to_string()
    }

    fn evaluate(&self, document: &Document) -> Outcome {
        let mut problems = Vec::new();

        for rule in &self.config.fields {
            let label = locate_label(document, rule)?;
            let field = locate_field(document, rule)?;
            match (label, field) {
                (Some(_), Some(_)) => {}
                (None, Some(_)) => {
                    problems.push(format!("label[for=\"{}\"] not found", rule.id))
                }
                (Some(_), None) => problems.push(format!(
                    "label[for=\"{}\"] points at a missing {}",
                    rule.id,
                    rule.kind.tag()
                )),
                (None, None) => problems.push(format!(
                    "neither label[for=\"{}\"] nor {}#{} found",
                    rule.id,
                    rule.kind.tag(),
                    rule.id
                )),
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CheckFailure::new(problems.join("; ")))
        }
    }
}

/// Integration checks for a profile
pub fn checks(config: &Config) -> Vec<Box<dyn Check>> {
    vec![
        Box::new(InsideFormCheck { config: config.clone() }),
        Box::new(LabelsPairedCheck { config: config.clone() }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSIDE: &str = r#"
        <form>
            <label for="gender">Gender</label>
            <select id="gender"></select>
            <label for="address">Address</label>
            <textarea id="address"></textarea>
            <button type="submit">Go</button>
            <button type="reset">Clear</button>
        </form>
    "#;

    fn inside() -> InsideFormCheck {
        InsideFormCheck { config: Config::default() }
    }

    fn paired() -> LabelsPairedCheck {
        LabelsPairedCheck { config: Config::default() }
    }

    #[test]
    fn test_everything_inside_form() {
        let doc = Document::parse(INSIDE);
        assert!(inside().evaluate(&doc).is_ok());
        assert!(paired().evaluate(&doc).is_ok());
    }

    #[test]
    fn test_button_outside_form() {
        let doc = Document::parse(
            r#"<form>
                <select id="gender"></select>
                <textarea id="address"></textarea>
                <button type="submit">Go</button>
            </form>
            <button type="reset">Clear</button>"#,
        );
        let failure = inside().evaluate(&doc).unwrap_err();
        assert_eq!(failure.message, "button[type=\"reset\"] is outside the form");
    }

    #[test]
    fn test_missing_form() {
        let doc = Document::parse(r#"<select id="gender"></select>"#);
        let failure = inside().evaluate(&doc).unwrap_err();
        assert_eq!(failure.message, "form element `form` not found");
    }

    #[test]
    fn test_missing_elements_reported_together() {
        let doc = Document::parse(r#"<form><textarea id="address"></textarea></form>"#);
        let failure = inside().evaluate(&doc).unwrap_err();
        assert!(failure.message.contains("select#gender not found"));
        assert!(failure.message.contains("button[type=\"submit\"] not found"));
        assert!(!failure.message.contains("textarea"));
    }

    #[test]
    fn test_label_without_field() {
        let doc = Document::parse(
            r#"<form>
                <label for="gender">Gender</label>
                <label for="address">Address</label>
                <textarea id="address"></textarea>
            </form>"#,
        );
        let failure = paired().evaluate(&doc).unwrap_err();
        assert_eq!(failure.message, "label[for=\"gender\"] points at a missing select");
    }

    #[test]
    fn test_field_without_label() {
        let doc = Document::parse(
            r#"<form>
                <select id="gender"></select>
                <label for="address">Address</label>
                <textarea id="address"></textarea>
            </form>"#,
        );
        let failure = paired().evaluate(&doc).unwrap_err();
        assert_eq!(failure.message, "label[for=\"gender\"] not found");
    }
}
