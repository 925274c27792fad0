// SPDX-License-Identifier: PMPL-1.0-or-later
//! image-manager: alt text and descriptions for site images
//!
//! Walks the site's image directory, asks a vision-capable language model to
//! describe each image, and writes the results to a YAML catalog that the
//! site templates read alt text from.
//!
//! Images are processed one at a time. A failure on one image is recorded on
//! that image's entry and never aborts the run.

pub mod analyzer;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod parse;
pub mod prompt;
pub mod record;
pub mod report;
pub mod vision;

pub use analyzer::{AnalysisProgress, ImageAnalyzer};
pub use catalog::{CatalogMetadata, ImageCatalog};
pub use config::{load_config, Config};
pub use error::{ImageError, Result};
pub use parse::{parse_analysis, ImageAnalysis};
pub use record::{Dimensions, ImageRecord};
pub use report::generate_report;
pub use vision::{OpenAiVisionClient, VisionModel, VisionRequest};
