// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text and intrinsic size attributes.
//!
//! An empty `alt` is reported the same as a missing one: every image on
//! the site is expected to carry generated alt text.

use super::{non_empty_attr, selector, HtmlCheck};
use crate::config::HtmlConfig;
use crate::result::ValidationResult;
use scraper::Html;

/// How many offending sources are listed in the error location
const LISTED_SOURCES: usize = 3;

pub struct ImageAttributes;

impl HtmlCheck for ImageAttributes {
    fn name(&self) -> &str {
        "Image attributes"
    }

    fn check(&self, document: &Html, _config: &HtmlConfig, result: &mut ValidationResult) {
        let images: Vec<_> = document.select(&selector("img")).collect();

        if images.is_empty() {
            result.add_info("No images found");
            return;
        }

        let mut missing_alt = Vec::new();
        let mut missing_dimensions = 0;

        for img in &images {
            let src = img.value().attr("src").unwrap_or("unknown");

            if non_empty_attr(img, "alt").is_none() {
                missing_alt.push(src);
            }

            if non_empty_attr(img, "width").is_none() || non_empty_attr(img, "height").is_none() {
                missing_dimensions += 1;
            }
        }

        if !missing_alt.is_empty() {
            let listed: Vec<&str> = missing_alt.iter().take(LISTED_SOURCES).copied().collect();
            result.add_error_at(
                format!("{} images missing alt text", missing_alt.len()),
                format!("Images: {}", listed.join(", ")),
            );
        }

        if missing_dimensions > 0 {
            result.add_warning(format!(
                "{} images missing width/height attributes",
                missing_dimensions
            ));
        }

        result.add_info(format!("Total images: {}", images.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::run_check;

    fn body(content: &str) -> String {
        format!("<!DOCTYPE html><html><head><title>t</title></head><body>{}</body></html>", content)
    }

    #[test]
    fn test_no_images() {
        let result = run_check(&ImageAttributes, &body("<p>text</p>"));
        assert_eq!(result.info(), &["No images found".to_string()]);
    }

    #[test]
    fn test_well_formed_images() {
        let html = body(r#"<img src="a.jpg" alt="Beach at sunset" width="800" height="600">"#);
        let result = run_check(&ImageAttributes, &html);
        assert!(result.passed());
        assert!(result.warnings().is_empty());
        assert_eq!(result.info(), &["Total images: 1".to_string()]);
    }

    #[test]
    fn test_missing_and_empty_alt_listed() {
        let html = body(
            r#"<img src="a.jpg"><img src="b.jpg" alt=""><img src="c.jpg"><img src="d.jpg"><img alt="ok" src="e.jpg">"#,
        );
        let result = run_check(&ImageAttributes, &html);

        assert_eq!(result.errors().len(), 1);
        let error = &result.errors()[0];
        assert_eq!(error.message, "4 images missing alt text");
        assert_eq!(error.location.as_deref(), Some("Images: a.jpg, b.jpg, c.jpg"));
        assert_eq!(result.warnings()[0].message, "5 images missing width/height attributes");
    }

    #[test]
    fn test_missing_src_reported_as_unknown() {
        let result = run_check(&ImageAttributes, &body("<img>"));
        assert_eq!(result.errors()[0].location.as_deref(), Some("Images: unknown"));
    }
}
