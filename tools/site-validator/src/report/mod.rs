// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for validation results.
//!
//! - Text: console summary with per-file details
//! - JSON: every result summary plus run totals

use crate::error::Result;
use crate::result::{Issue, ResultSummary, ValidationResult};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;

const RULE: &str = "============================================================";

/// Errors and warnings shown per file before eliding
const MAX_ISSUES_SHOWN: usize = 3;
/// Info lines shown per file
const MAX_INFO_SHOWN: usize = 2;

/// Totals across all results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl ReportSummary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let passed = results.iter().filter(|r| r.passed()).count();
        Self {
            total_tests: results.len(),
            passed,
            failed: results.len() - passed,
            total_errors: results.iter().map(|r| r.errors().len()).sum(),
            total_warnings: results.iter().map(|r| r.warnings().len()).sum(),
        }
    }

    /// Whether the run should exit non-zero
    pub fn is_failure(&self, strict: bool) -> bool {
        self.total_errors > 0 || (strict && self.total_warnings > 0)
    }
}

/// The machine-readable report written by `--save-report`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub timestamp: DateTime<Local>,
    pub results: Vec<ResultSummary>,
    pub summary: ReportSummary,
}

impl ValidationReport {
    pub fn new(results: &[ValidationResult], timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            results: results.iter().map(ValidationResult::summary).collect(),
            summary: ReportSummary::from_results(results),
        }
    }

    /// Write as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Human-readable report
pub fn generate_text_report(results: &[ValidationResult], generated: DateTime<Local>) -> String {
    let summary = ReportSummary::from_results(results);
    let mut lines = vec![
        String::new(),
        RULE.to_string(),
        "📊 VALIDATION REPORT".to_string(),
        RULE.to_string(),
        format!("Generated: {}", generated.format("%Y-%m-%d %H:%M:%S")),
        String::new(),
        "📈 Overall Status:".to_string(),
        format!("   Tests Passed: {}/{}", summary.passed, summary.total_tests),
        format!("   Total Errors: {}", summary.total_errors),
        format!("   Total Warnings: {}", summary.total_warnings),
    ];

    for result in results {
        let status = if result.passed() { "✅" } else { "❌" };
        lines.push(String::new());
        lines.push(format!("{} {}", status, result.name()));

        push_issues(&mut lines, "Errors", result.errors());
        push_issues(&mut lines, "Warnings", result.warnings());

        for info in result.info().iter().take(MAX_INFO_SHOWN) {
            lines.push(format!("   ℹ  {}", info));
        }
    }

    lines.push(String::new());
    lines.push(RULE.to_string());
    if summary.total_errors == 0 {
        lines.push("✅ ALL VALIDATIONS PASSED!".to_string());
    } else {
        lines.push(format!("⚠️  {} ERRORS NEED ATTENTION", summary.total_errors));
    }
    lines.push(RULE.to_string());

    lines.join("\n")
}

fn push_issues(lines: &mut Vec<String>, label: &str, issues: &[Issue]) {
    if issues.is_empty() {
        return;
    }

    lines.push(format!("   {} ({}):", label, issues.len()));
    for issue in issues.iter().take(MAX_ISSUES_SHOWN) {
        lines.push(format!("      • {}", issue.message));
    }
    if issues.len() > MAX_ISSUES_SHOWN {
        lines.push(format!("      ... and {} more", issues.len() - MAX_ISSUES_SHOWN));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::FileKind;
    use tempfile::TempDir;

    fn sample_results() -> Vec<ValidationResult> {
        let mut page = ValidationResult::new(FileKind::Html, Path::new("docs/index.html"));
        page.add_error("Missing required page title: <title>");
        for i in 0..5 {
            page.add_warning(format!("warning {}", i));
        }
        page.add_info("Valid HTML5 structure");
        page.add_info("Total images: 0");
        page.add_info("Total links: 4");

        let mut sheet = ValidationResult::new(FileKind::Css, Path::new("docs/css/main.css"));
        sheet.add_info("Total CSS rules: 12");

        vec![page, sheet]
    }

    #[test]
    fn test_summary_totals_and_exit_policy() {
        let summary = ReportSummary::from_results(&sample_results());
        assert_eq!(summary.total_tests, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_warnings, 5);
        assert!(summary.is_failure(false));

        let warnings_only = ReportSummary {
            total_errors: 0,
            ..summary
        };
        assert!(!warnings_only.is_failure(false));
        assert!(warnings_only.is_failure(true));
    }

    #[test]
    fn test_text_report_layout() {
        let report = generate_text_report(&sample_results(), Local::now());

        assert!(report.contains("📊 VALIDATION REPORT"));
        assert!(report.contains("   Tests Passed: 1/2"));
        assert!(report.contains("❌ HTML: index.html"));
        assert!(report.contains("✅ CSS: main.css"));
        assert!(report.contains("   Warnings (5):"));
        assert!(report.contains("      • warning 2"));
        assert!(!report.contains("      • warning 3"));
        assert!(report.contains("      ... and 2 more"));
        assert!(!report.contains("Total links: 4"));
        assert!(report.contains("⚠️  1 ERRORS NEED ATTENTION"));
    }

    #[test]
    fn test_all_passed_verdict() {
        let results = vec![ValidationResult::new(FileKind::Css, Path::new("a.css"))];
        let report = generate_text_report(&results, Local::now());
        assert!(report.contains("✅ ALL VALIDATIONS PASSED!"));
    }

    #[test]
    fn test_save_report_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports/validation.json");

        ValidationReport::new(&sample_results(), Local::now())
            .save(&path)
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["summary"]["total_tests"], 2);
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["results"][0]["name"], "HTML: index.html");
        assert_eq!(value["results"][0]["passed"], false);
        assert!(value["timestamp"].is_string());
    }
}
