// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Check profile for formbot
//!
//! The profile holds every literal the checks compare against: field ids,
//! names, tabindex numbers, accesskey letters and option values. The
//! defaults reproduce the "advanced form elements" assignment (gender
//! select, address textarea, submit and reset buttons).

use crate::error::{FormbotError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// File name looked up when checking a directory
    #[serde(default = "default_document_name")]
    pub document_name: String,

    /// Directory names skipped when grading a directory
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Document structure expectations
    #[serde(default)]
    pub structure: StructureConfig,

    /// Form fields to check, in report order
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldRule>,

    /// Action buttons to check, in report order
    #[serde(default = "default_buttons")]
    pub buttons: Vec<ButtonRule>,

    /// Cross-cutting keyboard accessibility thresholds
    #[serde(default)]
    pub accessibility: AccessibilityConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            document_name: default_document_name(),
            exclude: default_exclude(),
            structure: StructureConfig::default(),
            fields: default_fields(),
            buttons: default_buttons(),
            accessibility: AccessibilityConfig::default(),
        }
    }
}

fn default_document_name() -> String {
    "index.html".to_string()
}

fn default_exclude() -> Vec<String> {
    vec![
        ".git".to_string(),
        "node_modules".to_string(),
        "target".to_string(),
        "dist".to_string(),
        "build".to_string(),
        "vendor".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

/// Document structure configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureConfig {
    /// Require `<!DOCTYPE html>` at the top of the raw source
    #[serde(default = "default_true")]
    pub require_doctype: bool,

    /// Elements that must be present in the parsed tree
    #[serde(default = "default_required_elements")]
    pub required_elements: Vec<String>,

    /// Selector of the form that must contain every field and button
    #[serde(default = "default_form_selector")]
    pub form_selector: String,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            require_doctype: true,
            required_elements: default_required_elements(),
            form_selector: default_form_selector(),
        }
    }
}

fn default_required_elements() -> Vec<String> {
    vec!["html".to_string(), "head".to_string(), "body".to_string()]
}

fn default_form_selector() -> String {
    "form".to_string()
}

/// Kind of form control a field rule targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Select,
    Textarea,
    Input,
}

impl FieldKind {
    /// HTML tag name of this control
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Select => "select",
            FieldKind::Textarea => "textarea",
            FieldKind::Input => "input",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Expectations for one form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Expected `id` attribute
    pub id: String,

    /// Expected element kind
    pub kind: FieldKind,

    /// Expected `name` attribute (skipped when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Require the boolean `required` attribute
    #[serde(default = "default_true")]
    pub required: bool,

    /// Expected `tabindex` literal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabindex: Option<String>,

    /// Expected `accesskey` on the `label[for=id]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_accesskey: Option<String>,

    /// Attributes that must be present with a non-empty value
    #[serde(default)]
    pub non_empty_attributes: Vec<String>,

    /// Option rules, only meaningful for selects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionsRule>,
}

/// Expectations for the `<option>` children of a select
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsRule {
    /// Minimum number of options
    #[serde(default)]
    pub min_count: usize,

    /// First option must have an empty value (placeholder)
    #[serde(default)]
    pub placeholder_first: bool,

    /// Values that must appear among the options
    #[serde(default)]
    pub values: Vec<String>,
}

/// Expectations for one action button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonRule {
    /// Button `type` attribute (`submit`, `reset`, ...)
    #[serde(rename = "type")]
    pub button_type: String,

    /// Expected `accesskey` literal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accesskey: Option<String>,

    /// Expected `tabindex` literal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabindex: Option<String>,

    /// Require non-empty visible text
    #[serde(default = "default_true")]
    pub require_text: bool,
}

/// Cross-cutting accessibility configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityConfig {
    /// Minimum number of elements carrying `accesskey`
    #[serde(default = "default_min_attributes")]
    pub min_accesskeys: usize,

    /// Minimum number of elements carrying `tabindex`
    #[serde(default = "default_min_attributes")]
    pub min_tabindex: usize,

    /// Reject duplicate numeric `tabindex` values
    #[serde(default = "default_true")]
    pub unique_tabindex: bool,

    /// Reject duplicate `accesskey` values
    #[serde(default = "default_true")]
    pub unique_accesskeys: bool,
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            min_accesskeys: default_min_attributes(),
            min_tabindex: default_min_attributes(),
            unique_tabindex: true,
            unique_accesskeys: true,
        }
    }
}

fn default_min_attributes() -> usize {
    4
}

fn default_fields() -> Vec<FieldRule> {
    vec![
        FieldRule {
            id: "gender".to_string(),
            kind: FieldKind::Select,
            name: Some("gender".to_string()),
            required: true,
            tabindex: Some("6".to_string()),
            label_accesskey: Some("g".to_string()),
            non_empty_attributes: Vec::new(),
            options: Some(OptionsRule {
                min_count: 4,
                placeholder_first: true,
                values: vec!["male".to_string(), "female".to_string(), "other".to_string()],
            }),
        },
        FieldRule {
            id: "address".to_string(),
            kind: FieldKind::Textarea,
            name: Some("address".to_string()),
            required: true,
            tabindex: Some("7".to_string()),
            label_accesskey: Some("a".to_string()),
            non_empty_attributes: vec!["rows".to_string(), "cols".to_string()],
            options: None,
        },
    ]
}

fn default_buttons() -> Vec<ButtonRule> {
    vec![
        ButtonRule {
            button_type: "submit".to_string(),
            accesskey: Some("r".to_string()),
            tabindex: Some("8".to_string()),
            require_text: true,
        },
        ButtonRule {
            button_type: "reset".to_string(),
            accesskey: Some("x".to_string()),
            tabindex: Some("9".to_string()),
            require_text: true,
        },
    ]
}

impl Config {
    /// Reject profiles whose literals cannot be embedded in a selector
    pub fn validate(&self) -> Result<()> {
        let mut seen_ids = HashSet::new();
        for field in &self.fields {
            check_literal("field id", &field.id)?;
            if let Some(name) = &field.name {
                check_literal("field name", name)?;
            }
            if !seen_ids.insert(field.id.as_str()) {
                return Err(FormbotError::Config(format!(
                    "field id `{}` is configured more than once",
                    field.id
                )));
            }
            if field.options.is_some() && field.kind != FieldKind::Select {
                return Err(FormbotError::Config(format!(
                    "field `{}` has option rules but is a <{}>",
                    field.id, field.kind
                )));
            }
        }

        let mut seen_types = HashSet::new();
        for button in &self.buttons {
            check_literal("button type", &button.button_type)?;
            if !seen_types.insert(button.button_type.as_str()) {
                return Err(FormbotError::Config(format!(
                    "button type `{}` is configured more than once",
                    button.button_type
                )));
            }
        }

        if self.structure.form_selector.trim().is_empty() {
            return Err(FormbotError::Config("form_selector must not be empty".to_string()));
        }
        check_literal("document name", &self.document_name)?;

        Ok(())
    }
}

fn check_literal(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FormbotError::Config(format!("{} must not be empty", what)));
    }
    if value.contains('"') || value.contains('\\') {
        return Err(FormbotError::Config(format!(
            "{} `{}` must not contain quotes or backslashes",
            what, value
        )));
    }
    Ok(())
}

/// Load configuration from a TOML or YAML file
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(FormbotError::MissingFile { path: path.to_path_buf() });
    }

    let content = std::fs::read_to_string(path)?;

    let config: Config = if path.extension().map(|e| e == "toml").unwrap_or(false) {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    config.validate()?;
    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Load the given configuration file, or the assignment defaults when none is given
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_config(p),
        None => {
            debug!("No configuration given, using assignment defaults");
            Ok(Config::default())
        }
    }
}

/// Default path for a profile next to the checked documents
pub fn default_config_path() -> PathBuf {
    PathBuf::from("formbot.toml")
}

/// Write default configuration to a file
pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let content = if path.extension().map(|e| e == "toml").unwrap_or(false) {
        toml::to_string_pretty(&config).map_err(|e| FormbotError::Config(e.to_string()))?
    } else {
        serde_yaml::to_string(&config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_assignment_profile() {
        let config = Config::default();
        assert_eq!(config.document_name, "index.html");
        assert_eq!(config.fields.len(), 2);
        assert_eq!(config.fields[0].id, "gender");
        assert_eq!(config.fields[0].tabindex.as_deref(), Some("6"));
        assert_eq!(config.fields[1].kind, FieldKind::Textarea);
        assert_eq!(config.buttons[1].accesskey.as_deref(), Some("x"));
        assert_eq!(config.accessibility.min_tabindex, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("document_name: form.html\n").unwrap();
        assert_eq!(config.document_name, "form.html");
        assert_eq!(config.fields, default_fields());
        assert!(config.structure.require_doctype);
    }

    #[test]
    fn test_toml_button_type_rename() {
        let toml_src = r#"
            [[buttons]]
            type = "submit"
            accesskey = "s"
        "#;
        let config: Config = toml::from_str(toml_src).unwrap();
        assert_eq!(config.buttons.len(), 1);
        assert_eq!(config.buttons[0].button_type, "submit");
        assert!(config.buttons[0].require_text);
        assert_eq!(config.buttons[0].tabindex, None);
    }

    #[test]
    fn test_validate_rejects_quoted_id() {
        let mut config = Config::default();
        config.fields[0].id = "gen\"der".to_string();
        assert!(matches!(config.validate(), Err(FormbotError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_field() {
        let mut config = Config::default();
        config.fields[1].id = "gender".to_string();
        config.fields[1].kind = FieldKind::Select;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_options_on_textarea() {
        let mut config = Config::default();
        config.fields[1].options = Some(OptionsRule {
            min_count: 1,
            placeholder_first: false,
            values: Vec::new(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let result = load_config(Path::new("/nonexistent/formbot.toml"));
        assert!(matches!(result, Err(FormbotError::MissingFile { .. })));
    }

    #[test]
    fn test_write_and_load_default_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile").join("formbot.toml");
        write_default_config(&path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_write_and_load_default_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("formbot.yml");
        write_default_config(&path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, Config::default());
    }
}
