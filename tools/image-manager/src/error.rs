// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for image-manager

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, ImageError>;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Vision API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Vision API reply contained no message content")]
    EmptyResponse,

    #[error("OpenAI API key not found. Set {0} environment variable.")]
    MissingApiKey(String),
}
