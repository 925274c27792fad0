// SPDX-License-Identifier: PMPL-1.0-or-later
//! Title length, canonical URL and Open Graph tags

use super::{selector, truncate, HtmlCheck};
use crate::config::HtmlConfig;
use crate::result::ValidationResult;
use scraper::Html;

/// Open Graph properties needed for a complete link preview
const OPEN_GRAPH_PROPERTIES: &[&str] = &["og:title", "og:description", "og:image"];

pub struct SeoBasics;

impl HtmlCheck for SeoBasics {
    fn name(&self) -> &str {
        "SEO basics"
    }

    fn check(&self, document: &Html, config: &HtmlConfig, result: &mut ValidationResult) {
        if let Some(title) = document.select(&selector("title")).next() {
            let text: String = title.text().collect();
            let text = text.trim();
            let range = config.title_length;
            let len = text.chars().count();

            if len < range.min {
                result.add_warning(format!(
                    "Title too short ({} chars, recommended {}-{})",
                    len, range.min, range.max
                ));
            } else if len > range.max {
                result.add_warning(format!(
                    "Title too long ({} chars, recommended {}-{})",
                    len, range.min, range.max
                ));
            }
            result.add_info(format!("Title: {}", truncate(text, range.max)));
        }

        if document
            .select(&selector(r#"link[rel~="canonical"]"#))
            .next()
            .is_none()
        {
            result.add_warning("Missing canonical URL");
        }

        let complete = OPEN_GRAPH_PROPERTIES.iter().all(|property| {
            let meta = selector(&format!(r#"meta[property="{}"]"#, property));
            document.select(&meta).next().is_some()
        });
        if !complete {
            result.add_warning("Incomplete Open Graph tags (missing title, description, or image)");
        }
    }
}
