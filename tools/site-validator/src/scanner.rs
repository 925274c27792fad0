// SPDX-License-Identifier: PMPL-1.0-or-later
//! Discovery of rendered files and the validation run over them.
//!
//! HTML files are validated first, then stylesheets. The walk is sorted by
//! file name so repeated runs report in the same order.

use crate::config::Config;
use crate::css::CssValidator;
use crate::html::HtmlValidator;
use crate::result::{FileKind, ValidationResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Files found under the docs directory, in walk order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Discovered {
    pub html: Vec<PathBuf>,
    pub css: Vec<PathBuf>,
}

impl Discovered {
    pub fn len(&self) -> usize {
        self.html.len() + self.css.len()
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty() && self.css.is_empty()
    }
}

/// Walk `dir`, collecting `.html` and `.css` files.
///
/// Entries whose file name appears in `exclude` are skipped, directories
/// included. A missing directory yields nothing, and entries that cannot
/// be read are logged and skipped.
pub fn discover(dir: &Path, exclude: &[String]) -> Discovered {
    let mut found = Discovered::default();

    if !dir.exists() {
        warn!("Docs directory not found: {}", dir.display());
        return found;
    }

    let walker = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            !exclude.iter().any(|x| x == name)
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        match path.extension().and_then(|e| e.to_str()) {
            Some("html") => found.html.push(path),
            Some("css") => found.css.push(path),
            _ => {}
        }
    }

    debug!(
        "Discovered {} HTML and {} CSS files under {}",
        found.html.len(),
        found.css.len(),
        dir.display()
    );

    found
}

/// Progress events emitted while validating
#[derive(Debug)]
pub enum Progress<'a> {
    /// A batch of files of one kind is about to be validated
    Started { kind: FileKind, count: usize },
    /// One file has been validated
    Checked(&'a ValidationResult),
}

/// Runs HTML and CSS validation over a docs tree
pub struct SiteValidator {
    docs_dir: PathBuf,
    exclude: Vec<String>,
    html: HtmlValidator,
    css: CssValidator,
}

impl SiteValidator {
    pub fn new(config: Config) -> Self {
        Self {
            docs_dir: config.docs_dir,
            exclude: config.exclude,
            html: HtmlValidator::new(config.html),
            css: CssValidator::new(config.css),
        }
    }

    /// Validate every discovered file, one result per file
    pub fn validate_all<F>(&self, mut on_progress: F) -> Vec<ValidationResult>
    where
        F: FnMut(Progress<'_>),
    {
        let files = discover(&self.docs_dir, &self.exclude);
        let mut results = Vec::with_capacity(files.len());

        info!("Validating {} files in {}", files.len(), self.docs_dir.display());

        on_progress(Progress::Started {
            kind: FileKind::Html,
            count: files.html.len(),
        });
        for path in &files.html {
            let result = self.html.validate_file(path);
            on_progress(Progress::Checked(&result));
            results.push(result);
        }

        on_progress(Progress::Started {
            kind: FileKind::Css,
            count: files.css.len(),
        });
        for path in &files.css {
            let result = self.css.validate_file(path);
            on_progress(Progress::Checked(&result));
            results.push(result);
        }

        results
    }
}
