// SPDX-License-Identifier: PMPL-1.0-or-later
//! Charset, viewport and description meta tags

use super::{non_empty_attr, selector, HtmlCheck};
use crate::config::HtmlConfig;
use crate::result::ValidationResult;
use scraper::Html;

pub struct MetaTags;

impl HtmlCheck for MetaTags {
    fn name(&self) -> &str {
        "Meta tags"
    }

    fn check(&self, document: &Html, config: &HtmlConfig, result: &mut ValidationResult) {
        let charset = selector(r#"meta[charset], meta[http-equiv="Content-Type"]"#);
        if document.select(&charset).next().is_none() {
            result.add_warning("Missing charset declaration");
        }

        let viewport = selector(r#"meta[name="viewport"]"#);
        if document.select(&viewport).next().is_none() {
            result.add_warning("Missing viewport meta tag for responsive design");
        }

        let description = selector(r#"meta[name="description"]"#);
        match document.select(&description).next() {
            None => result.add_warning("Missing meta description for SEO"),
            Some(meta) => {
                // An empty content attribute is not length-checked
                if let Some(content) = non_empty_attr(&meta, "content") {
                    let range = config.description_length;
                    let len = content.chars().count();
                    if len < range.min {
                        result.add_warning(format!(
                            "Meta description too short ({} chars, recommended {}-{})",
                            len, range.min, range.max
                        ));
                    } else if len > range.max {
                        result.add_warning(format!(
                            "Meta description too long ({} chars, recommended {}-{})",
                            len, range.min, range.max
                        ));
                    }
                }
            }
        }
    }
}
