// SPDX-License-Identifier: PMPL-1.0-or-later
//! CSS validation.
//!
//! Checks, in reporting order:
//! - stylesheet parses (otherwise a single error and nothing else)
//! - number of top-level style rules
//! - outdated vendor-prefixed properties
//! - `!important` usage
//! - number of distinct colour values
//! - file size

pub mod parser;

use crate::config::CssConfig;
use crate::result::{FileKind, ValidationResult};
use parser::{parse_stylesheet, Stylesheet};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

const IMPORTANT: &str = "!important";

/// Validates stylesheets
#[derive(Default)]
pub struct CssValidator {
    config: CssConfig,
}

impl CssValidator {
    pub fn new(config: CssConfig) -> Self {
        Self { config }
    }

    /// Validate a stylesheet on disk
    pub fn validate_file(&self, path: &Path) -> ValidationResult {
        match std::fs::read_to_string(path) {
            Ok(content) => self.validate_str(path, &content),
            Err(e) => {
                let mut result = ValidationResult::new(FileKind::Css, path);
                result.add_error(format!("CSS parsing error: {}", e));
                result
            }
        }
    }

    /// Validate already-loaded CSS, attributing results to `path`
    pub fn validate_str(&self, path: &Path, content: &str) -> ValidationResult {
        let mut result = ValidationResult::new(FileKind::Css, path);

        let sheet = match parse_stylesheet(content) {
            Ok(sheet) => sheet,
            Err(e) => {
                debug!("{}: {}", path.display(), e);
                result.add_error(format!("CSS parsing error: {}", e));
                return result;
            }
        };

        result.add_info(format!("Total CSS rules: {}", sheet.rules.len()));

        check_vendor_prefixes(&sheet, &self.config, &mut result);
        check_important(content, &self.config, &mut result);
        check_colors(&sheet, &mut result);
        check_size(content, &self.config, &mut result);

        result
    }
}

/// One warning per declaration using a deprecated prefixed property
fn check_vendor_prefixes(sheet: &Stylesheet, config: &CssConfig, result: &mut ValidationResult) {
    for rule in &sheet.rules {
        for decl in &rule.declarations {
            if config.deprecated_properties.iter().any(|p| *p == decl.name) {
                result.add_warning_at(
                    format!("Outdated vendor prefix: {}", decl.name),
                    format!("Selector: {}", rule.selector),
                );
            }
        }
    }
}

/// Counted on the raw text, comments included
fn check_important(content: &str, config: &CssConfig, result: &mut ValidationResult) {
    let count = content.matches(IMPORTANT).count();

    if count > config.important_threshold {
        result.add_warning(format!("Excessive use of !important ({} instances)", count));
    } else if count > 0 {
        result.add_info(format!("!important used {} times", count));
    }
}

fn check_colors(sheet: &Stylesheet, result: &mut ValidationResult) {
    let colors: HashSet<&str> = sheet
        .rules
        .iter()
        .flat_map(|rule| &rule.declarations)
        .filter(|decl| decl.name.contains("color") || decl.name.contains("background"))
        .map(|decl| decl.value.trim())
        .collect();

    result.add_info(format!("Unique colors used: {}", colors.len()));
}

fn check_size(content: &str, config: &CssConfig, result: &mut ValidationResult) {
    let size_kb = content.len() as f64 / 1024.0;

    result.add_info(format!("File size: {:.2} KB", size_kb));
    if size_kb > config.max_size_kb {
        result.add_warning(format!(
            "CSS file is large ({:.2} KB), consider splitting or minifying",
            size_kb
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(css: &str) -> ValidationResult {
        CssValidator::default().validate_str(Path::new("main.css"), css)
    }

    #[test]
    fn test_clean_stylesheet() {
        let css = "body { color: #333; background: #fff }\n.hero { background-color: #fff }\n";
        let result = validate(css);

        assert!(result.passed());
        assert!(result.warnings().is_empty());
        assert_eq!(result.info()[0], "Total CSS rules: 2");
        assert_eq!(result.info()[1], "Unique colors used: 2");
        assert!(result.info()[2].starts_with("File size: 0.0"));
    }

    #[test]
    fn test_parse_error_short_circuits() {
        let result = validate(".a { color: red;\n");
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].message.starts_with("CSS parsing error:"));
        assert!(result.info().is_empty());
        assert!(result.warnings().is_empty());
    }

    #[test]
    fn test_vendor_prefix_per_declaration() {
        let css = ".a { -moz-border-radius: 4px; border-radius: 4px }\n.b { -webkit-border-radius: 2px; -moz-box-shadow: none }";
        let messages: Vec<String> = validate(css)
            .warnings()
            .iter()
            .map(|w| w.message.clone())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Outdated vendor prefix: -moz-border-radius",
                "Outdated vendor prefix: -webkit-border-radius",
                "Outdated vendor prefix: -moz-box-shadow",
            ]
        );
    }

    #[test]
    fn test_vendor_prefix_names_selector() {
        let result = validate(".card, .panel { -moz-border-radius: 4px }");
        let warning = &result.warnings()[0];
        assert_eq!(warning.message, "Outdated vendor prefix: -moz-border-radius");
        assert_eq!(warning.location.as_deref(), Some("Selector: .card, .panel"));
    }

    #[test]
    fn test_excessive_important() {
        let body: String = (0..12).map(|i| format!("m{}: 0 !important;", i)).collect();
        let result = validate(&format!(".a {{ {} }}", body));
        assert_eq!(
            result.warnings()[0].message,
            "Excessive use of !important (12 instances)"
        );
        assert!(!result.info().iter().any(|i| i.starts_with("!important used")));
    }

    #[test]
    fn test_moderate_important_is_info() {
        let body: String = (0..5).map(|i| format!("m{}: 0 !important;", i)).collect();
        let result = validate(&format!(".a {{ {} }}", body));
        assert!(result.warnings().is_empty());
        assert!(result.info().contains(&"!important used 5 times".to_string()));
    }

    #[test]
    fn test_colors_ignore_important_marker() {
        let css = ".a { color: red !important }\n.b { color: red }\n.c { border-color: blue }";
        let result = validate(css);
        assert!(result.info().contains(&"Unique colors used: 2".to_string()));
    }

    #[test]
    fn test_large_file_warning() {
        let padding = format!("/* {} */", "x".repeat(110 * 1024));
        let result = validate(&format!(".a {{ color: red }}\n{}", padding));
        let warning = &result.warnings()[0].message;
        assert!(warning.starts_with("CSS file is large ("));
        assert!(warning.ends_with("KB), consider splitting or minifying"));
    }

    #[test]
    fn test_at_rules_not_counted() {
        let css = "@media print { .a { color: black } .b { color: white } }\n.c { margin: 0 }";
        assert_eq!(validate(css).info()[0], "Total CSS rules: 1");
    }
}
