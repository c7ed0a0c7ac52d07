// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Action control checks: submit/reset buttons, their keyboard wiring and text.

use crate::checks::{expect_attr, found, Check, CheckFailure, Outcome};
use crate::config::{ButtonRule, Config};
use crate::document::{self, attr_selector, Document, Element};
use crate::error::Result;
use crate::outcome::CheckGroup;

/// One expectation about a button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAspect {
    Exists,
    Accesskey(String),
    Tabindex(String),
    /// Non-empty visible text after trimming
    Text,
}

/// A single expectation about one configured button
pub struct ButtonCheck {
    pub rule: ButtonRule,
    pub aspect: ButtonAspect,
}

/// Locate the first `button[type=..]` of the configured type
pub fn locate_button<'a>(document: &'a Document, rule: &ButtonRule) -> Result<Option<Element<'a>>> {
    document.find_first(&attr_selector("button", "type", &rule.button_type))
}

impl ButtonCheck {
    fn subject(&self) -> String {
        attr_selector("button", "type", &self.rule.button_type)
    }
}

impl Check for ButtonCheck {
    fn id(&self) -> String {
        let suffix = match &self.aspect {
            ButtonAspect::Exists => "exists",
            ButtonAspect::Accesskey(_) => "accesskey",
            ButtonAspect::Tabindex(_) => "tabindex",
            ButtonAspect::Text => "text",
        };
        format!("controls.{}.{}", self.rule.button_type, suffix)
    }

    fn group(&self) -> CheckGroup {
        CheckGroup::Controls
    }

    fn description(&self) -> String {
        let subject = self.subject();
        match &self.aspect {
            ButtonAspect::Exists => format!("{} exists", subject),
            ButtonAspect::Accesskey(key) => format!("{} has accesskey=\"{}\"", subject, key),
            ButtonAspect::Tabindex(value) => format!("{} has tabindex=\"{}\"", subject, value),
            ButtonAspect::Text => format!("{} has visible text", subject),
        }
    }

    fn evaluate(&self, document: &Document) -> Outcome {
        let subject = self.subject();
        let button = found(locate_button(document, &self.rule)?, || subject.clone())?;

        match &self.aspect {
            ButtonAspect::Exists => Ok(()),
            ButtonAspect::Accesskey(key) => expect_attr(button, "accesskey", key, &subject),
            ButtonAspect::Tabindex(value) => expect_attr(button, "tabindex", value, &subject),
            ButtonAspect::Text => {
                if document::text_content(button).trim().is_empty() {
                    Err(CheckFailure::new(format!("{} has no visible text", subject)))
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// Expand one button rule into its checks
pub fn button_checks(rule: &ButtonRule) -> Vec<ButtonCheck> {
    let mut aspects = vec![ButtonAspect::Exists];

    if let Some(key) = &rule.accesskey {
        aspects.push(ButtonAspect::Accesskey(key.clone()));
    }
    if let Some(value) = &rule.tabindex {
        aspects.push(ButtonAspect::Tabindex(value.clone()));
    }
    if rule.require_text {
        aspects.push(ButtonAspect::Text);
    }

    aspects
        .into_iter()
        .map(|aspect| ButtonCheck { rule: rule.clone(), aspect })
        .collect()
}

/// Control checks for a profile, in configured button order
pub fn checks(config: &Config) -> Vec<Box<dyn Check>> {
    config
        .buttons
        .iter()
        .flat_map(button_checks)
        .map(|check| Box::new(check) as Box<dyn Check>)
        .collect()
}
