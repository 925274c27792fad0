// SPDX-License-Identifier: PMPL-1.0-or-later
//! Per-image metadata records

use crate::parse::ImageAnalysis;
use chrono::{DateTime, Local};
use image::ImageFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Header and size facts about an image file, filled in as they are read
#[derive(Debug, Clone, Default)]
pub struct ImageInfo {
    pub dimensions: Option<Dimensions>,
    pub format: Option<ImageFormat>,
    pub size_kb: f64,
}

impl ImageInfo {
    /// Upper-case format name as stored in the catalog, e.g. `JPEG`
    pub fn format_name(&self) -> Option<String> {
        self.format.map(|f| format!("{:?}", f).to_uppercase())
    }
}

/// One catalog entry. Field order is the serialized order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Path relative to the static root, with `/` separators
    pub file: String,
    pub category: String,
    pub alt_text: String,
    pub description: String,
    #[serde(default)]
    pub key_elements: Vec<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub accessibility_notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    pub size_kb: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub analyzed_at: DateTime<Local>,
}

impl ImageRecord {
    /// Record for a successfully analyzed image
    pub fn analyzed(file: String, category: String, analysis: ImageAnalysis, info: &ImageInfo) -> Self {
        Self {
            file,
            category,
            alt_text: analysis.alt_text,
            description: analysis.description,
            key_elements: analysis.key_elements,
            use_cases: analysis.use_cases,
            accessibility_notes: analysis.accessibility_notes,
            dimensions: info.dimensions,
            size_kb: round2(info.size_kb),
            format: info.format_name(),
            error: None,
            analyzed_at: Local::now(),
        }
    }

    /// Record for an image whose analysis failed part-way
    pub fn failed(file: String, category: String, error: String, info: &ImageInfo) -> Self {
        Self {
            alt_text: format!("Image for {}", category),
            description: "Analysis failed".to_string(),
            key_elements: Vec::new(),
            use_cases: Vec::new(),
            accessibility_notes: String::new(),
            dimensions: info.dimensions,
            size_kb: round2(info.size_kb),
            format: info.format_name(),
            error: Some(error),
            analyzed_at: Local::now(),
            file,
            category,
        }
    }

    /// Missing alt text or a failed analysis
    pub fn needs_review(&self) -> bool {
        self.alt_text.is_empty() || self.error.is_some()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
