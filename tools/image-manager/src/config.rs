// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration for image-manager

use crate::error::{ImageError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned for images
    pub images_dir: PathBuf,
    /// Root that record paths are made relative to
    pub static_root: PathBuf,
    /// Where the YAML catalog is written
    pub output_file: PathBuf,
    /// Accepted file extensions, compared case-insensitively
    pub extensions: Vec<String>,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub prompts: PromptConfig,
    pub vision: VisionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Used in the context sentence for categories without their own entry
    pub site_description: String,
    /// Per-category context sentences, taking precedence over the built-in table
    pub contexts: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    /// Image detail level sent with each request (`low`, `high`, `auto`)
    pub detail: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("static/images"),
            static_root: PathBuf::from("static"),
            output_file: PathBuf::from("content/data/images.yaml"),
            extensions: ["jpg", "jpeg", "png", "gif", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            prompts: PromptConfig::default(),
            vision: VisionConfig::default(),
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            site_description: "property concierge service website".to_string(),
            contexts: BTreeMap::new(),
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 500,
            detail: "low".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Load configuration from a YAML or TOML file.
///
/// A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::from_str(&content).map_err(|e| ImageError::Config(format!("TOML parse error: {}", e)))
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| ImageError::Config(format!("YAML parse error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config(Path::new("/nonexistent/image-manager.yaml")).unwrap();
        assert_eq!(config.images_dir, PathBuf::from("static/images"));
        assert_eq!(config.vision.model, "gpt-4o-mini");
        assert_eq!(config.vision.max_tokens, 500);
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("image-manager.yaml");
        std::fs::write(
            &path,
            "images_dir: assets/img\nprompts:\n  contexts:\n    gallery: A photo from the gallery.\nvision:\n  detail: high\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.images_dir, PathBuf::from("assets/img"));
        assert_eq!(config.vision.detail, "high");
        assert_eq!(config.vision.model, "gpt-4o-mini");
        assert_eq!(
            config.prompts.contexts.get("gallery").map(String::as_str),
            Some("A photo from the gallery.")
        );
        assert_eq!(config.prompts.site_description, "property concierge service website");
    }

    #[test]
    fn test_toml_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("image-manager.toml");
        std::fs::write(&path, "output_file = \"data/images.yaml\"\n\n[vision]\ntimeout_secs = 5\n")
            .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.output_file, PathBuf::from("data/images.yaml"));
        assert_eq!(config.vision.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("image-manager.yaml");
        std::fs::write(&path, "vision: [unclosed").unwrap();

        assert!(matches!(load_config(&path), Err(ImageError::Config(_))));
    }
}
