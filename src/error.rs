// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for formbot

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormbotError>;

/// Fatal errors. Assertion failures are not errors; they are reported
/// per check as [`crate::checks::CheckFailure`].
#[derive(Error, Debug)]
pub enum FormbotError {
    #[error("Document not found: {}. Ensure the file exists at the expected location.", .path.display())]
    MissingFile { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
