// SPDX-License-Identifier: PMPL-1.0-or-later
//! Per-file validation result.
//!
//! A `ValidationResult` belongs to exactly one validated file. Checks only
//! ever append to it; `passed` is derived from the error list.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single error or warning entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub message: String,
    pub location: Option<String>,
}

/// Kind of file a result was produced for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Html,
    Css,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Html => write!(f, "HTML"),
            FileKind::Css => write!(f, "CSS"),
        }
    }
}

/// Accumulated errors, warnings and info for one file
#[derive(Debug, Clone)]
pub struct ValidationResult {
    name: String,
    path: PathBuf,
    kind: FileKind,
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
    info: Vec<String>,
}

impl ValidationResult {
    /// Create an empty result named after the file, e.g. `HTML: index.html`
    pub fn new(kind: FileKind, path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            name: format!("{}: {}", kind, file_name),
            path: path.to_path_buf(),
            kind,
            errors: Vec::new(),
            warnings: Vec::new(),
            info: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(Issue {
            message: message.into(),
            location: None,
        });
    }

    pub fn add_error_at(&mut self, message: impl Into<String>, location: impl Into<String>) {
        self.errors.push(Issue {
            message: message.into(),
            location: Some(location.into()),
        });
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(Issue {
            message: message.into(),
            location: None,
        });
    }

    pub fn add_warning_at(&mut self, message: impl Into<String>, location: impl Into<String>) {
        self.warnings.push(Issue {
            message: message.into(),
            location: Some(location.into()),
        });
    }

    pub fn add_info(&mut self, message: impl Into<String>) {
        self.info.push(message.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn errors(&self) -> &[Issue] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Issue] {
        &self.warnings
    }

    pub fn info(&self) -> &[String] {
        &self.info
    }

    /// True iff no error was recorded
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Serializable snapshot used by the JSON report
    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            name: self.name.clone(),
            path: self.path.clone(),
            passed: self.passed(),
            error_count: self.errors.len(),
            warning_count: self.warnings.len(),
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
            info: self.info.clone(),
        }
    }
}

/// Summary view of a `ValidationResult`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSummary {
    pub name: String,
    pub path: PathBuf,
    pub passed: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub info: Vec<String>,
}
