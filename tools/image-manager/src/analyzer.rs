// SPDX-License-Identifier: PMPL-1.0-or-later
//! Per-image analysis and the sequential batch over all discovered images.
//!
//! A failure while reading, encoding or describing one image is recorded on
//! that image's record; the batch always produces one record per image.

use crate::config::Config;
use crate::discovery::discover_images;
use crate::error::Result;
use crate::parse::{parse_analysis, ImageAnalysis};
use crate::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::record::{Dimensions, ImageInfo, ImageRecord};
use crate::vision::{VisionModel, VisionRequest};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageReader;
use std::io::Cursor;
use std::path::{Component, Path};
use tracing::{debug, info, warn};

/// Progress events emitted by [`ImageAnalyzer::analyze_all`]
#[derive(Debug)]
pub enum AnalysisProgress<'a> {
    /// Discovery finished
    Found { total: usize },
    /// About to analyze image `index` (1-based) of `total`
    Analyzing {
        index: usize,
        total: usize,
        file: &'a str,
    },
    /// The record for the image just analyzed
    Analyzed(&'a ImageRecord),
}

pub struct ImageAnalyzer<M> {
    config: Config,
    model: M,
}

impl<M: VisionModel> ImageAnalyzer<M> {
    pub fn new(config: Config, model: M) -> Self {
        Self { config, model }
    }

    /// Analyze every discovered image in sorted order
    pub async fn analyze_all<F>(&self, mut on_progress: F) -> Vec<ImageRecord>
    where
        F: FnMut(AnalysisProgress<'_>),
    {
        let images = discover_images(&self.config.images_dir, &self.config.extensions);
        let total = images.len();
        on_progress(AnalysisProgress::Found { total });

        let mut records = Vec::with_capacity(total);
        for (i, path) in images.iter().enumerate() {
            let file = self.relative_file(path);
            on_progress(AnalysisProgress::Analyzing {
                index: i + 1,
                total,
                file: &file,
            });

            let record = self.analyze_image(path).await;
            on_progress(AnalysisProgress::Analyzed(&record));
            records.push(record);
        }

        let failed = records.iter().filter(|r| r.error.is_some()).count();
        info!("Analyzed {} images ({} failed)", records.len(), failed);

        records
    }

    /// Analyze one image. Never fails: errors end up on the record.
    pub async fn analyze_image(&self, path: &Path) -> ImageRecord {
        let file = self.relative_file(path);
        let category = category_of(path);
        let mut info = ImageInfo::default();

        match self.describe(path, &category, &mut info).await {
            Ok(analysis) => ImageRecord::analyzed(file, category, analysis, &info),
            Err(e) => {
                warn!("Error analyzing {}: {}", path.display(), e);
                ImageRecord::failed(file, category, e.to_string(), &info)
            }
        }
    }

    async fn describe(&self, path: &Path, category: &str, info: &mut ImageInfo) -> Result<ImageAnalysis> {
        let bytes = std::fs::read(path)?;
        info.size_kb = bytes.len() as f64 / 1024.0;

        let reader = ImageReader::new(Cursor::new(&bytes)).with_guessed_format()?;
        let format = reader.format();
        info.format = format;
        let (width, height) = reader.into_dimensions()?;
        info.dimensions = Some(Dimensions { width, height });

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let request = VisionRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: user_prompt(&self.config.prompts, category, &stem),
            mime_type: format
                .map(|f| f.to_mime_type())
                .unwrap_or("application/octet-stream")
                .to_string(),
            image_base64: STANDARD.encode(&bytes),
        };

        debug!("Describing {} ({} bytes)", path.display(), bytes.len());
        let reply = self.model.describe(&request).await?;

        Ok(parse_analysis(&reply, category))
    }

    /// Path relative to the static root, joined with `/`
    fn relative_file(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.config.static_root).unwrap_or(path);
        relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Name of the image's parent directory
fn category_of(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
