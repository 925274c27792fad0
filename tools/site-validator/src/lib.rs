// SPDX-License-Identifier: PMPL-1.0-or-later
//! site-validator: structural, accessibility and SEO linter for a rendered site
//!
//! Walks the output directory of a static site generator and validates every
//! HTML page and stylesheet it finds.
//!
//! ## HTML checks
//!
//! - **Structure**: required `html`, `head`, `title` and `body` elements
//! - **Meta**: charset, viewport, description length
//! - **Images**: alt text and explicit dimensions
//! - **Links**: empty hrefs, `rel="noopener noreferrer"` on external links
//! - **Headings**: single h1, no skipped levels
//! - **Accessibility**: `lang`, skip link, `<main>` landmark, form labels
//! - **SEO**: title length, canonical URL, Open Graph tags
//!
//! ## CSS checks
//!
//! Parse validity, outdated vendor prefixes, `!important` usage, colour
//! palette size and file size.

pub mod config;
pub mod css;
pub mod error;
pub mod html;
pub mod report;
pub mod result;
pub mod scanner;

pub use config::{load_config, Config};
pub use css::CssValidator;
pub use error::{Result, ValidatorError};
pub use html::{HtmlCheck, HtmlValidator};
pub use report::{generate_text_report, ReportSummary, ValidationReport};
pub use result::{FileKind, Issue, ValidationResult};
pub use scanner::{discover, Progress, SiteValidator};
