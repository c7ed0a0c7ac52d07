// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Per-field conformance checks.
//!
//! Each configured field expands into one check per expectation:
//! existence, `name`, `required`, `tabindex`, option rules for selects,
//! non-empty attributes (e.g. textarea `rows`/`cols`), and the
//! `label[for]` association with its `accesskey`.

use crate::checks::{expect_attr, found, Check, CheckFailure, Outcome};
use crate::config::{Config, FieldRule};
use crate::document::{self, attr_selector, Document, Element};
use crate::error::Result;
use crate::outcome::CheckGroup;

/// One expectation about a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAspect {
    /// Element with the expected tag and id exists
    Exists,
    /// `name` equals the literal
    Name(String),
    /// Boolean `required` attribute present
    Required,
    /// `tabindex` equals the literal
    Tabindex(String),
    /// At least this many `<option>` descendants
    MinOptions(usize),
    /// First option has `value=""`
    PlaceholderOption,
    /// Every listed value appears among the options
    OptionValues(Vec<String>),
    /// Attribute present with a non-empty value
    NonEmptyAttribute(String),
    /// A `label[for=id]` exists
    Label,
    /// The label carries this `accesskey`
    LabelAccesskey(String),
}

/// A single expectation about one configured field
pub struct FieldCheck {
    pub rule: FieldRule,
    pub aspect: FieldAspect,
}

/// Locate the configured field by tag and id
pub fn locate_field<'a>(document: &'a Document, rule: &FieldRule) -> Result<Option<Element<'a>>> {
    document.find_first(&attr_selector(rule.kind.tag(), "id", &rule.id))
}

/// Locate the `label[for=id]` of a field
pub fn locate_label<'a>(document: &'a Document, rule: &FieldRule) -> Result<Option<Element<'a>>> {
    document.find_first(&attr_selector("label", "for", &rule.id))
}

impl FieldCheck {
    fn subject(&self) -> String {
        format!("{}#{}", self.rule.kind.tag(), self.rule.id)
    }

    fn field<'a>(&self, document: &'a Document) -> std::result::Result<Element<'a>, CheckFailure> {
        found(locate_field(document, &self.rule)?, || self.subject())
    }

    fn label<'a>(&self, document: &'a Document) -> std::result::Result<Element<'a>, CheckFailure> {
        found(locate_label(document, &self.rule)?, || {
            format!("label[for=\"{}\"]", self.rule.id)
        })
    }
}

impl Check for FieldCheck {
    fn id(&self) -> String {
        let suffix = match &self.aspect {
            FieldAspect::Exists => "exists".to_string(),
            FieldAspect::Name(_) => "name".to_string(),
            FieldAspect::Required => "required".to_string(),
            FieldAspect::Tabindex(_) => "tabindex".to_string(),
            FieldAspect::MinOptions(_) => "options.count".to_string(),
            FieldAspect::PlaceholderOption => "options.placeholder".to_string(),
            FieldAspect::OptionValues(_) => "options.values".to_string(),
            FieldAspect::NonEmptyAttribute(name) => format!("attr.{}", name),
            FieldAspect::Label => "label".to_string(),
            FieldAspect::LabelAccesskey(_) => "label.accesskey".to_string(),
        };
        format!("field.{}.{}", self.rule.id, suffix)
    }

    fn group(&self) -> CheckGroup {
        CheckGroup::Fields
    }

    fn description(&self) -> String {
        let subject = self.subject();
        match &self.aspect {
            FieldAspect::Exists => format!("{} exists", subject),
            FieldAspect::Name(name) => format!("{} has name=\"{}\"", subject, name),
            FieldAspect::Required => format!("{} has the required attribute", subject),
            FieldAspect::Tabindex(value) => format!("{} has tabindex=\"{}\"", subject, value),
            FieldAspect::MinOptions(min) => format!("{} has at least {} options", subject, min),
            FieldAspect::PlaceholderOption => {
                format!("{} starts with a placeholder option (value=\"\")", subject)
            }
            FieldAspect::OptionValues(values) => {
                format!("{} offers options {}", subject, values.join(", "))
            }
            FieldAspect::NonEmptyAttribute(name) => {
                format!("{} has a non-empty {} attribute", subject, name)
            }
            FieldAspect::Label => format!("label[for=\"{}\"] exists", self.rule.id),
            FieldAspect::LabelAccesskey(key) => {
                format!("label[for=\"{}\"] has accesskey=\"{}\"", self.rule.id, key)
            }
        }
    }

    fn evaluate(&self, document: &Document) -> Outcome {
        let subject = self.subject();

        match &self.aspect {
            FieldAspect::Exists => {
                self.field(document)?;
                Ok(())
            }
            FieldAspect::Name(name) => expect_attr(self.field(document)?, "name", name, &subject),
            FieldAspect::Required => {
                if document::has_attr(self.field(document)?, "required") {
                    Ok(())
                } else {
                    Err(CheckFailure::new(format!("{} is missing the required attribute", subject)))
                }
            }
            FieldAspect::Tabindex(value) => {
                expect_attr(self.field(document)?, "tabindex", value, &subject)
            }
            FieldAspect::MinOptions(min) => {
                let options = document::find_all_in(self.field(document)?, "option")?;
                if options.len() >= *min {
                    Ok(())
                } else {
                    Err(CheckFailure::new(format!(
                        "{} has {} option(s), expected at least {}",
                        subject,
                        options.len(),
                        min
                    )))
                }
            }
            FieldAspect::PlaceholderOption => {
                let first = found(document::find_first_in(self.field(document)?, "option")?, || {
                    format!("<option> inside {}", subject)
                })?;
                match document::attr(first, "value") {
                    Some("") => Ok(()),
                    Some(value) => Err(CheckFailure::new(format!(
                        "first option of {} has value=\"{}\", expected an empty placeholder value",
                        subject, value
                    ))),
                    None => Err(CheckFailure::new(format!(
                        "first option of {} has no value attribute, expected value=\"\"",
                        subject
                    ))),
                }
            }
            FieldAspect::OptionValues(expected) => {
                let options = document::find_all_in(self.field(document)?, "option")?;
                let present: Vec<&str> = options
                    .iter()
                    .filter_map(|option| document::attr(*option, "value"))
                    .collect();
                let missing: Vec<&str> = expected
                    .iter()
                    .map(String::as_str)
                    .filter(|value| !present.contains(value))
                    .collect();
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(CheckFailure::new(format!(
                        "{} has no option with value {}",
                        subject,
                        missing
                            .iter()
                            .map(|v| format!("\"{}\"", v))
                            .collect::<Vec<_>>()
                            .join(", ")
                    )))
                }
            }
            FieldAspect::NonEmptyAttribute(name) => {
                match document::attr(self.field(document)?, name) {
                    Some(value) if !value.is_empty() => Ok(()),
                    Some(_) => Err(CheckFailure::new(format!(
                        "{} has an empty {} attribute",
                        subject, name
                    ))),
                    None => Err(CheckFailure::new(format!(
                        "{} is missing the {} attribute",
                        subject, name
                    ))),
                }
            }
            FieldAspect::Label => {
                self.label(document)?;
                Ok(())
            }
            FieldAspect::LabelAccesskey(key) => {
                let what = format!("label[for=\"{}\"]", self.rule.id);
                expect_attr(self.label(document)?, "accesskey", key, &what)
            }
        }
    }
}

/// Expand one field rule into its checks
pub fn field_checks(rule: &FieldRule) -> Vec<FieldCheck> {
    let mut aspects = vec![FieldAspect::Exists];

    if let Some(name) = &rule.name {
        aspects.push(FieldAspect::Name(name.clone()));
    }
    if rule.required {
        aspects.push(FieldAspect::Required);
    }
    if let Some(tabindex) = &rule.tabindex {
        aspects.push(FieldAspect::Tabindex(tabindex.clone()));
    }
    if let Some(options) = &rule.options {
        if options.min_count > 0 {
            aspects.push(FieldAspect::MinOptions(options.min_count));
        }
        if options.placeholder_first {
            aspects.push(FieldAspect::PlaceholderOption);
        }
        if !options.values.is_empty() {
            aspects.push(FieldAspect::OptionValues(options.values.clone()));
        }
    }
    for name in &rule.non_empty_attributes {
        aspects.push(FieldAspect::NonEmptyAttribute(name.clone()));
    }
    aspects.push(FieldAspect::Label);
    if let Some(key) = &rule.label_accesskey {
        aspects.push(FieldAspect::LabelAccesskey(key.clone()));
    }

    aspects
        .into_iter()
        .map(|aspect| FieldCheck { rule: rule.clone(), aspect })
        .collect()
}

/// Field checks for a profile, in configured field order
pub fn checks(config: &Config) -> Vec<Box<dyn Check>> {
    config
        .fields
        .iter()
        .flat_map(field_checks)
        .map(|check| Box::new(check) as Box<dyn Check>)
        .collect()
}
