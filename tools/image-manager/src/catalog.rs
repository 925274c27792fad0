// SPDX-License-Identifier: PMPL-1.0-or-later
//! The YAML image catalog consumed by the site templates

use crate::error::Result;
use crate::record::ImageRecord;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCatalog {
    pub images: Vec<ImageRecord>,
    pub metadata: CatalogMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMetadata {
    pub total_images: usize,
    pub analyzed_at: DateTime<Local>,
    /// Distinct record categories, sorted
    pub categories: Vec<String>,
}

impl ImageCatalog {
    pub fn new(images: Vec<ImageRecord>, analyzed_at: DateTime<Local>) -> Self {
        let categories: BTreeSet<&str> = images.iter().map(|r| r.category.as_str()).collect();
        let metadata = CatalogMetadata {
            total_images: images.len(),
            analyzed_at,
            categories: categories.into_iter().map(String::from).collect(),
        };

        Self { images, metadata }
    }

    /// Write as YAML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, serde_yaml::to_string(self)?)?;
        info!("Saved {} image records to {}", self.images.len(), path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ImageInfo;
    use tempfile::TempDir;

    fn failed(file: &str, category: &str) -> ImageRecord {
        ImageRecord::failed(file.into(), category.into(), "boom".into(), &ImageInfo::default())
    }

    #[test]
    fn test_metadata_categories_sorted_and_distinct() {
        let catalog = ImageCatalog::new(
            vec![
                failed("images/services/a.png", "services"),
                failed("images/hero/b.png", "hero"),
                failed("images/services/c.png", "services"),
                failed("images/about/d.png", "about"),
            ],
            Local::now(),
        );

        assert_eq!(catalog.metadata.total_images, 4);
        assert_eq!(catalog.metadata.categories, vec!["about", "hero", "services"]);
    }

    #[test]
    fn test_save_creates_parents_and_reloads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("content/data/images.yaml");

        let catalog = ImageCatalog::new(vec![failed("images/hero/b.png", "hero")], Local::now());
        catalog.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let loaded: ImageCatalog = serde_yaml::from_str(&text).unwrap();
        assert_eq!(loaded.images.len(), 1);
        assert_eq!(loaded.images[0].file, "images/hero/b.png");
        assert_eq!(loaded.images[0].error.as_deref(), Some("boom"));
        assert_eq!(loaded.metadata.categories, vec!["hero"]);
        assert!(text.starts_with("images:"));
    }
}
