// SPDX-License-Identifier: PMPL-1.0-or-later
//! Heading hierarchy, in document order

use super::{selector, HtmlCheck};
use crate::config::HtmlConfig;
use crate::result::ValidationResult;
use scraper::Html;

/// Number of levels shown in the structure summary
const SUMMARY_LEVELS: usize = 5;

pub struct HeadingHierarchy;

impl HtmlCheck for HeadingHierarchy {
    fn name(&self) -> &str {
        "Heading hierarchy"
    }

    fn check(&self, document: &Html, _config: &HtmlConfig, result: &mut ValidationResult) {
        let levels: Vec<u8> = document
            .select(&selector("h1, h2, h3, h4, h5, h6"))
            .filter_map(|h| heading_level(h.value().name()))
            .collect();

        let Some(&first) = levels.first() else {
            result.add_warning("No headings found");
            return;
        };

        if first != 1 {
            result.add_warning(format!("Page should start with h1, found h{}", first));
        }

        for pair in levels.windows(2) {
            let (prev, level) = (pair[0], pair[1]);
            if level > prev + 1 {
                result.add_warning(format!("Heading hierarchy skip: h{} to h{}", prev, level));
            }
        }

        let h1_count = levels.iter().filter(|&&l| l == 1).count();
        if h1_count > 1 {
            result.add_warning(format!(
                "Multiple h1 tags found ({}), should have only one",
                h1_count
            ));
        }

        let structure: Vec<String> = levels
            .iter()
            .take(SUMMARY_LEVELS)
            .map(|l| format!("h{}", l))
            .collect();
        result.add_info(format!("Heading structure: {}", structure.join(" -> ")));
    }
}

fn heading_level(tag: &str) -> Option<u8> {
    tag.strip_prefix('h')?.parse().ok()
}
