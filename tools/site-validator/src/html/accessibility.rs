// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility landmarks and form labelling.
//!
//! - `lang` on the root element
//! - a skip-navigation link (`a.skip-link` or `href="#main-content"`)
//! - a `<main>` landmark (or an element with `role="main"`)
//! - every fillable form control referenced by a `<label for>`

use super::{non_empty_attr, selector, HtmlCheck};
use crate::config::HtmlConfig;
use crate::result::ValidationResult;
use scraper::Html;
use std::collections::HashSet;

/// Input types that need no label
const UNLABELLED_INPUT_TYPES: &[&str] = &["submit", "button", "hidden"];

pub struct Landmarks;

impl HtmlCheck for Landmarks {
    fn name(&self) -> &str {
        "Accessibility landmarks"
    }

    fn check(&self, document: &Html, _config: &HtmlConfig, result: &mut ValidationResult) {
        if let Some(html) = document.select(&selector("html")).next() {
            if non_empty_attr(&html, "lang").is_none() {
                result.add_warning("Missing lang attribute on <html> tag");
            }
        }

        let skip_link = selector(r##"a.skip-link, a[href="#main-content"]"##);
        if document.select(&skip_link).next().is_none() {
            result.add_warning("Missing skip-to-content link for keyboard navigation");
        }

        let main = selector(r#"main, [role="main"]"#);
        if document.select(&main).next().is_none() {
            result.add_warning("Missing <main> landmark for screen readers");
        }

        let labelled: HashSet<&str> = document
            .select(&selector("label[for]"))
            .filter_map(|label| label.value().attr("for"))
            .collect();

        for control in document.select(&selector("input, textarea, select")) {
            let input_type = control.value().attr("type");
            if input_type.is_some_and(|t| UNLABELLED_INPUT_TYPES.contains(&t)) {
                continue;
            }

            let has_label = non_empty_attr(&control, "id").is_some_and(|id| labelled.contains(id));
            if !has_label {
                result.add_warning(format!(
                    "Form input missing associated label: {}",
                    control.value().attr("name").unwrap_or("unknown")
                ));
            }
        }
    }
}
