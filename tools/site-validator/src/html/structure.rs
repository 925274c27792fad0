// SPDX-License-Identifier: PMPL-1.0-or-later
//! Required document elements

use super::{selector, HtmlCheck};
use crate::config::HtmlConfig;
use crate::result::ValidationResult;
use scraper::Html;

/// Elements every page must contain, with a description for the message
const REQUIRED_ELEMENTS: &[(&str, &str)] = &[
    ("html", "root element"),
    ("head", "head section"),
    ("title", "page title"),
    ("body", "body section"),
];

pub struct RequiredElements;

impl HtmlCheck for RequiredElements {
    fn name(&self) -> &str {
        "Required elements"
    }

    fn check(&self, document: &Html, _config: &HtmlConfig, result: &mut ValidationResult) {
        for (tag, description) in REQUIRED_ELEMENTS {
            if document.select(&selector(tag)).next().is_none() {
                result.add_error(format!("Missing required {}: <{}>", description, tag));
            }
        }
    }
}
