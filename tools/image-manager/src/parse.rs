// SPDX-License-Identifier: PMPL-1.0-or-later
//! Turning a free-text model reply into structured image metadata.
//!
//! The reply is searched for the span from the first `{` to the last `}`.
//! That span is decoded as JSON when possible; otherwise the reply text
//! itself is used as a fallback. Nested or multiple JSON-like spans can be
//! mis-extracted, and the fallbacks cover that case too. Once the span
//! decodes, every field is kept whatever its JSON type.

use regex::Regex;
use serde_json::Value;

/// Alt text length used when the reply has no JSON at all
const FALLBACK_ALT_CHARS: usize = 125;
/// Description length used when the JSON span does not decode
const FALLBACK_DESCRIPTION_CHARS: usize = 200;

/// Structured metadata extracted from one reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageAnalysis {
    pub alt_text: String,
    pub description: String,
    pub key_elements: Vec<String>,
    pub use_cases: Vec<String>,
    pub accessibility_notes: String,
}

impl ImageAnalysis {
    /// Read fields from a decoded object, whatever their JSON types
    fn from_json(value: &Value) -> Self {
        Self {
            alt_text: text_field(value.get("alt_text")),
            description: text_field(value.get("description")),
            key_elements: list_field(value.get("key_elements")),
            use_cases: list_field(value.get("use_cases")),
            accessibility_notes: text_field(value.get("accessibility_notes")),
        }
    }
}

/// Scalars as text; `null` as empty; objects as compact JSON
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A string field. Lists are joined with `, `.
fn text_field(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(scalar_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => scalar_text(other),
    }
}

/// A list field. A string is split on commas.
fn list_field(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(scalar_text)
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(other) => vec![other.to_string()],
    }
}

/// Parse a model reply for an image in `category`
pub fn parse_analysis(reply: &str, category: &str) -> ImageAnalysis {
    let json_span = Regex::new(r"(?s)\{.*\}").expect("valid regex");

    let Some(span) = json_span.find(reply) else {
        return ImageAnalysis {
            alt_text: truncate(reply, FALLBACK_ALT_CHARS),
            description: reply.to_string(),
            accessibility_notes: "Auto-generated".to_string(),
            ..ImageAnalysis::default()
        };
    };

    match serde_json::from_str::<Value>(span.as_str()) {
        Ok(value) => ImageAnalysis::from_json(&value),
        Err(_) => ImageAnalysis {
            alt_text: format!("Image for {}", category),
            description: truncate(reply, FALLBACK_DESCRIPTION_CHARS),
            accessibility_notes: "Could not parse structured response".to_string(),
            ..ImageAnalysis::default()
        },
    }
}

/// First `max` characters of `s`
pub(crate) fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
