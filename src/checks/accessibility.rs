// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Document-wide keyboard accessibility invariants.
//!
//! Counts and uniqueness of `accesskey` and `tabindex` across every
//! element of the document, not only the configured fields.

use crate::checks::{Check, CheckFailure, Outcome};
use crate::config::Config;
use crate::document::{self, Document};
use crate::outcome::CheckGroup;
use std::collections::BTreeMap;

/// At least `min` elements carry `attribute`
pub struct AttributeCountCheck {
    pub attribute: String,
    pub min: usize,
}

impl Check for AttributeCountCheck {
    fn id(&self) -> String {
        format!("a11y.{}.count", self.attribute)
    }

    fn group(&self) -> CheckGroup {
        CheckGroup::Accessibility
    }

    fn description(&self) -> String {
        format!("at least {} elements carry {}", self.min, self.attribute)
    }

    fn evaluate(&self, document: &Document) -> Outcome {
        let count = document.find_all(&format!("[{}]", self.attribute))?.len();
        if count >= self.min {
            Ok(())
        } else {
            Err(CheckFailure::new(format!(
                "{} element(s) carry {}, expected at least {}",
                count, self.attribute, self.min
            )))
        }
    }
}

/// Numeric `tabindex` values are mutually unique
pub struct UniqueTabindexCheck;

impl Check for UniqueTabindexCheck {
    fn id(&self) -> String {
        "a11y.tabindex.unique".to_string()
    }

    fn group(&self) -> CheckGroup {
        CheckGroup::Accessibility
    }

    fn description(&self) -> String {
        "tabindex values are unique".to_string()
    }

    fn evaluate(&self, document: &Document) -> Outcome {
        let values = document
            .find_all("[tabindex]")?
            .into_iter()
            .filter_map(|el| document::attr(el, "tabindex"))
            .filter_map(parse_tabindex);

        ensure_unique("tabindex", values)
    }
}

/// Non-empty `accesskey` values are mutually unique
pub struct UniqueAccesskeyCheck;

impl Check for UniqueAccesskeyCheck {
    fn id(&self) -> String {
        "a11y.accesskey.unique".to_string()
    }

    fn group(&self) -> CheckGroup {
        CheckGroup::Accessibility
    }

    fn description(&self) -> String {
        "accesskey values are unique".to_string()
    }

    fn evaluate(&self, document: &Document) -> Outcome {
        let values = document
            .find_all("[accesskey]")?
            .into_iter()
            .filter_map(|el| document::attr(el, "accesskey"))
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        ensure_unique("accesskey", values)
    }
}

fn ensure_unique<T>(attribute: &str, values: impl Iterator<Item = T>) -> Outcome
where
    T: Ord + std::fmt::Display,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let duplicates: Vec<String> = counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(value, count)| format!("{}=\"{}\" used {} times", attribute, value, count))
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(CheckFailure::new(format!(
            "duplicate {} values: {}",
            attribute,
            duplicates.join(", ")
        )))
    }
}

/// HTML "rules for parsing integers": optional leading whitespace and
/// sign, then digits; trailing garbage is ignored. `None` when no digit.
pub fn parse_tabindex(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude: i64 = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Accessibility checks for a profile
pub fn checks(config: &Config) -> Vec<Box<dyn Check>> {
    let a11y = &config.accessibility;
    let mut checks: Vec<Box<dyn Check>> = vec![
        Box::new(AttributeCountCheck {
            attribute: "accesskey".to_string(),
            min: a11y.min_accesskeys,
        }),
        Box::new(AttributeCountCheck {
            attribute: "tabindex".to_string(),
            min: a11y.min_tabindex,
        }),
    ];

    if a11y.unique_tabindex {
        checks.push(Box::new(UniqueTabindexCheck));
    }
    if a11y.unique_accesskeys {
        checks.push(Box::new(UniqueAccesskeyCheck));
    }

    checks
}
