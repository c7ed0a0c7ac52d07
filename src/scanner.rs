// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Document loading and batch scanning.
//!
//! A single run loads one document (failing fast when it is missing) and
//! runs the whole battery. Grading walks a directory of submissions and
//! checks every file named like the configured document.

use crate::checks;
use crate::config::Config;
use crate::document::Document;
use crate::error::{FormbotError, Result};
use crate::outcome::CheckReport;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Resolve `path` against `base_dir`; `None` means the configured document name
pub fn resolve_document_path(base_dir: &Path, path: Option<&Path>, config: &Config) -> PathBuf {
    match path {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => base_dir.join(p),
        None => base_dir.join(&config.document_name),
    }
}

/// Load one document and run every check against it
pub fn scan_file(path: &Path, config: &Config) -> Result<CheckReport> {
    let document = Document::load(path)?;
    info!("Checking {}", path.display());
    Ok(checks::run_checks(&document, config))
}

/// Run every check against an in-memory document
pub fn scan_source(label: Option<&Path>, source: &str, config: &Config) -> CheckReport {
    let document = Document::parse(source);
    let mut report = checks::run_checks(&document, config);
    report.source = label.map(Path::to_path_buf);
    report
}

/// Check every document named `config.document_name` below `dir`
pub fn scan_directory(dir: &Path, config: &Config) -> Result<Vec<CheckReport>> {
    if !dir.is_dir() {
        return Err(FormbotError::MissingFile { path: dir.to_path_buf() });
    }

    info!("Grading directory: {}", dir.display());
    let mut reports = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            if e.depth() > 0 && e.file_type().is_dir() {
                return !config.exclude.iter().any(|x| x == name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || entry.file_name() != config.document_name.as_str() {
            continue;
        }

        match scan_file(entry.path(), config) {
            Ok(report) => reports.push(report),
            Err(e) => warn!("Skipping {}: {}", entry.path().display(), e),
        }
    }

    info!("Checked {} document(s)", reports.len());
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_document_path() {
        let config = Config::default();
        let base = Path::new("/srv/lesson8");
        assert_eq!(
            resolve_document_path(base, None, &config),
            PathBuf::from("/srv/lesson8/index.html")
        );
        assert_eq!(
            resolve_document_path(base, Some(Path::new("alt/form.html")), &config),
            PathBuf::from("/srv/lesson8/alt/form.html")
        );
        assert_eq!(
            resolve_document_path(base, Some(Path::new("/tmp/x.html")), &config),
            PathBuf::from("/tmp/x.html")
        );
    }

    #[test]
    fn test_scan_missing_file() {
        let result = scan_file(Path::new("/nonexistent/index.html"), &Config::default());
        assert!(matches!(result, Err(FormbotError::MissingFile { .. })));
    }

    #[test]
    fn test_scan_missing_directory() {
        let result = scan_directory(Path::new("/nonexistent/path"), &Config::default());
        assert!(matches!(result, Err(FormbotError::MissingFile { .. })));
    }

    #[test]
    fn test_scan_source_labels_report() {
        let report = scan_source(Some(Path::new("inline.html")), "<form></form>", &Config::default());
        assert_eq!(report.source, Some(PathBuf::from("inline.html")));
        assert!(!report.passed());
    }

    #[test]
    fn test_scan_directory_finds_submissions() {
        let dir = TempDir::new().unwrap();
        for student in ["alice", "bob"] {
            let sub = dir.path().join(student);
            std::fs::create_dir_all(&sub).unwrap();
            std::fs::write(sub.join("index.html"), "<!DOCTYPE html><form></form>").unwrap();
            std::fs::write(sub.join("notes.html"), "<p>ignored</p>").unwrap();
        }
        let skipped = dir.path().join("node_modules").join("pkg");
        std::fs::create_dir_all(&skipped).unwrap();
        std::fs::write(skipped.join("index.html"), "<p>vendored</p>").unwrap();

        let reports = scan_directory(dir.path(), &Config::default()).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports[0].source_label().contains("alice"));
        assert!(reports[1].source_label().contains("bob"));
    }
}
