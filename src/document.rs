// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Parsed HTML document and the read-only queries checks run against it.
//!
//! Every lookup that can come up empty returns `Option` (or an empty
//! `Vec`), so a check has to decide what absence means for it. Selector
//! compilation is the only fallible step and surfaces as
//! [`FormbotError::Selector`].

use crate::error::{FormbotError, Result};
use scraper::{ElementRef, Html, Selector};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A handle to one element of a [`Document`]
pub type Element<'a> = ElementRef<'a>;

/// An HTML document, parsed once and never mutated
pub struct Document {
    path: Option<PathBuf>,
    source: String,
    html: Html,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.path)
            .field("source_len", &self.source.len())
            .finish()
    }
}

impl Document {
    /// Load and parse a document from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(FormbotError::MissingFile { path: path.to_path_buf() });
        }

        let source = std::fs::read_to_string(path)?;
        debug!("Loaded {} ({} bytes)", path.display(), source.len());

        let mut document = Self::parse(source);
        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    /// Parse a document from an in-memory string
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let html = Html::parse_document(&source);
        Self { path: None, source, html }
    }

    /// Path the document was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw, unparsed source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// First element matching `css` in document order
    pub fn find_first(&self, css: &str) -> Result<Option<Element<'_>>> {
        let selector = compile(css)?;
        Ok(self.html.select(&selector).next())
    }

    /// All elements matching `css` in document order
    pub fn find_all(&self, css: &str) -> Result<Vec<Element<'_>>> {
        let selector = compile(css)?;
        Ok(self.html.select(&selector).collect())
    }
}

/// Compile a CSS selector
pub fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| FormbotError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// First descendant of `scope` matching `css`
pub fn find_first_in<'a>(scope: Element<'a>, css: &str) -> Result<Option<Element<'a>>> {
    let selector = compile(css)?;
    Ok(scope.select(&selector).next())
}

/// All descendants of `scope` matching `css`
pub fn find_all_in<'a>(scope: Element<'a>, css: &str) -> Result<Vec<Element<'a>>> {
    let selector = compile(css)?;
    Ok(scope.select(&selector).collect())
}

/// Value of attribute `name`, if present
pub fn attr<'a>(element: Element<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Whether attribute `name` is present, whatever its value
pub fn has_attr(element: Element<'_>, name: &str) -> bool {
    element.value().attr(name).is_some()
}

/// Concatenated text of the element and all its descendants
pub fn text_content(element: Element<'_>) -> String {
    element.text().collect()
}

/// DOM `contains`: true when `descendant` is `ancestor` or lies inside it
pub fn contains(ancestor: Element<'_>, descendant: Element<'_>) -> bool {
    let target = ancestor.deref().id();
    let node = descendant.deref();
    node.id() == target || node.ancestors().any(|a| a.id() == target)
}

/// Attribute-equals selector with the value quoted
pub fn attr_selector(tag: &str, name: &str, value: &str) -> String {
    format!("{}[{}=\"{}\"]", tag, name, value)
}
