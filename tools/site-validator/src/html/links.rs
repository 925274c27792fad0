// SPDX-License-Identifier: PMPL-1.0-or-later
//! Anchor hrefs and external link security attributes

use super::{selector, truncate, HtmlCheck};
use crate::config::HtmlConfig;
use crate::result::ValidationResult;
use scraper::Html;

/// `rel` tokens an external link must carry
const REQUIRED_REL: &[&str] = &["noopener", "noreferrer"];

pub struct LinkAttributes;

impl HtmlCheck for LinkAttributes {
    fn name(&self) -> &str {
        "Link attributes"
    }

    fn check(&self, document: &Html, config: &HtmlConfig, result: &mut ValidationResult) {
        let links: Vec<_> = document.select(&selector("a")).collect();
        let mut empty_links = 0;

        for link in &links {
            let href = link.value().attr("href").unwrap_or("");

            if href.is_empty() {
                empty_links += 1;
            }

            if is_external(href, &config.internal_prefixes) {
                let rel: Vec<&str> = link
                    .value()
                    .attr("rel")
                    .map(|r| r.split_whitespace().collect())
                    .unwrap_or_default();

                if !REQUIRED_REL.iter().all(|token| rel.contains(token)) {
                    result.add_warning(format!(
                        "External link missing security attributes: {}",
                        truncate(href, 50)
                    ));
                }
            }
        }

        if empty_links > 0 {
            result.add_warning(format!("{} links with empty href", empty_links));
        }

        result.add_info(format!("Total links: {}", links.len()));
    }
}

fn is_external(href: &str, internal_prefixes: &[String]) -> bool {
    href.starts_with("http") && !internal_prefixes.iter().any(|p| href.starts_with(p.as_str()))
}
