// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration for site-validator

use crate::error::{Result, ValidatorError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendered site to validate
    pub docs_dir: PathBuf,
    /// Fail on warnings as well as errors
    pub strict: bool,
    /// File or directory names skipped while walking `docs_dir`
    pub exclude: Vec<String>,
    pub html: HtmlConfig,
    pub css: CssConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Treat any HTML5 tree-builder error as a fatal parse error
    pub strict_parsing: bool,
    /// Recommended meta description length, in characters
    pub description_length: LengthRange,
    /// Recommended `<title>` length, in characters
    pub title_length: LengthRange,
    /// `http…` hrefs starting with one of these are not treated as external
    pub internal_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CssConfig {
    /// Vendor-prefixed properties that have long been standardised
    pub deprecated_properties: Vec<String>,
    /// More `!important` occurrences than this produce a warning
    pub important_threshold: usize,
    /// Stylesheets above this size produce a warning
    pub max_size_kb: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRange {
    pub min: usize,
    pub max: usize,
}

impl LengthRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            strict: false,
            exclude: Vec::new(),
            html: HtmlConfig::default(),
            css: CssConfig::default(),
        }
    }
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            strict_parsing: true,
            description_length: LengthRange::new(50, 160),
            title_length: LengthRange::new(30, 60),
            internal_prefixes: vec![
                "http://localhost".to_string(),
                "https://legsontheground.com".to_string(),
            ],
        }
    }
}

impl Default for CssConfig {
    fn default() -> Self {
        Self {
            deprecated_properties: vec![
                "-moz-border-radius".to_string(),
                "-webkit-border-radius".to_string(),
                "-moz-box-shadow".to_string(),
            ],
            important_threshold: 10,
            max_size_kb: 100.0,
        }
    }
}

/// Load configuration from a YAML or TOML file.
///
/// A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::from_str(&content)
            .map_err(|e| ValidatorError::Config(format!("TOML parse error: {}", e)))
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| ValidatorError::Config(format!("YAML parse error: {}", e)))
    }
}
