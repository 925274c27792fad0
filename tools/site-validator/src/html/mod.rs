// SPDX-License-Identifier: PMPL-1.0-or-later
//! HTML validation.
//!
//! A document is parsed once with html5ever (via `scraper`). If parsing
//! fails the file gets a single error and no further checks run. Otherwise
//! every check in [`default_checks`] runs unconditionally and appends to the
//! shared [`ValidationResult`].

pub mod accessibility;
pub mod headings;
pub mod images;
pub mod links;
pub mod meta;
pub mod seo;
pub mod structure;

use crate::config::HtmlConfig;
use crate::result::{FileKind, ValidationResult};
use scraper::{Html, Selector};
use std::path::Path;
use tracing::debug;

/// A single, independent check over a parsed document
pub trait HtmlCheck {
    /// Human-readable name of this check
    fn name(&self) -> &str;

    /// Inspect the document and append findings to `result`
    fn check(&self, document: &Html, config: &HtmlConfig, result: &mut ValidationResult);
}

/// The fixed battery of checks, in reporting order
pub fn default_checks() -> Vec<Box<dyn HtmlCheck>> {
    vec![
        Box::new(structure::RequiredElements),
        Box::new(meta::MetaTags),
        Box::new(images::ImageAttributes),
        Box::new(links::LinkAttributes),
        Box::new(headings::HeadingHierarchy),
        Box::new(accessibility::Landmarks),
        Box::new(seo::SeoBasics),
    ]
}

/// Validates rendered HTML files
pub struct HtmlValidator {
    config: HtmlConfig,
    checks: Vec<Box<dyn HtmlCheck>>,
}

impl HtmlValidator {
    pub fn new(config: HtmlConfig) -> Self {
        Self {
            config,
            checks: default_checks(),
        }
    }

    /// Validate a file on disk
    pub fn validate_file(&self, path: &Path) -> ValidationResult {
        match std::fs::read_to_string(path) {
            Ok(content) => self.validate_str(path, &content),
            Err(e) => {
                let mut result = ValidationResult::new(FileKind::Html, path);
                result.add_error(format!("Failed to validate: {}", e));
                result
            }
        }
    }

    /// Validate already-loaded markup, attributing results to `path`
    pub fn validate_str(&self, path: &Path, content: &str) -> ValidationResult {
        let mut result = ValidationResult::new(FileKind::Html, path);
        let document = Html::parse_document(content);

        if !document.errors.is_empty() {
            debug!(
                "{}: {} parse error(s), first: {}",
                path.display(),
                document.errors.len(),
                document.errors[0]
            );
            if self.config.strict_parsing {
                result.add_error(format!("HTML5 parsing error: {}", document.errors[0]));
                return result;
            }
            for err in &document.errors {
                result.add_warning(format!("HTML5 parse error: {}", err));
            }
        } else {
            result.add_info("Valid HTML5 structure");
        }

        for check in &self.checks {
            debug!("Running {} on {}", check.name(), path.display());
            check.check(&document, &self.config, &mut result);
        }

        result
    }
}

impl Default for HtmlValidator {
    fn default() -> Self {
        Self::new(HtmlConfig::default())
    }
}

/// Parse a selector known at compile time
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// First `max` characters of `s`
pub(crate) fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Attribute value, treating an empty string the same as a missing attribute
pub(crate) fn non_empty_attr<'a>(element: &scraper::ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name).filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) fn run_check(check: &dyn HtmlCheck, html: &str) -> ValidationResult {
    let document = Html::parse_document(html);
    let mut result = ValidationResult::new(FileKind::Html, Path::new("test.html"));
    check.check(&document, &HtmlConfig::default(), &mut result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Short</title>
</head>
<body>
<main id="main-content"><h1>Welcome</h1></main>
</body>
</html>
"#;

    #[test]
    fn test_clean_document_records_valid_structure() {
        let result = HtmlValidator::default().validate_str(Path::new("index.html"), CLEAN_PAGE);
        assert_eq!(result.info()[0], "Valid HTML5 structure");
        assert!(result.passed(), "unexpected errors: {:?}", result.errors());
    }

    #[test]
    fn test_strict_parse_error_short_circuits() {
        // No doctype is a tree-builder error
        let html = "<html><head><title>x</title></head><body></body></html>";
        let result = HtmlValidator::default().validate_str(Path::new("bad.html"), html);

        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].message.starts_with("HTML5 parsing error:"));
        assert!(result.warnings().is_empty());
        assert!(result.info().is_empty());
    }

    #[test]
    fn test_lenient_parsing_continues_with_warnings() {
        let config = HtmlConfig {
            strict_parsing: false,
            ..HtmlConfig::default()
        };
        let html = "<html><head><title>x</title></head><body></body></html>";
        let result = HtmlValidator::new(config).validate_str(Path::new("bad.html"), html);

        assert!(result
            .warnings()
            .iter()
            .any(|w| w.message.starts_with("HTML5 parse error:")));
        // Checks still ran
        assert!(result
            .warnings()
            .iter()
            .any(|w| w.message == "Missing canonical URL"));
    }

    #[test]
    fn test_unreadable_file() {
        let result = HtmlValidator::default().validate_file(Path::new("/nonexistent/page.html"));
        assert!(!result.passed());
        assert!(result.errors()[0].message.starts_with("Failed to validate:"));
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("héllo wörld", 5), "héllo");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
