// SPDX-License-Identifier: PMPL-1.0-or-later
//! Vision model interface and the OpenAI chat-completions client

use crate::config::VisionConfig;
use crate::error::{ImageError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// One image to describe
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// MIME type of the encoded image, e.g. `image/png`
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub image_base64: String,
}

impl VisionRequest {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.image_base64)
    }
}

/// Something that can describe an image in free text
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Return the model's raw reply for `request`
    async fn describe(&self, request: &VisionRequest) -> Result<String>;
}

/// Client for the OpenAI chat-completions API
pub struct OpenAiVisionClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    detail: String,
}

impl OpenAiVisionClient {
    pub fn new(config: &VisionConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: api_key.into(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            detail: config.detail.clone(),
        })
    }

    fn build_body(&self, request: &VisionRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(request.system_prompt.clone()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: request.user_prompt.clone(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: request.data_url(),
                                detail: self.detail.clone(),
                            },
                        },
                    ]),
                },
            ],
        }
    }
}

#[async_trait]
impl VisionModel for OpenAiVisionClient {
    async fn describe(&self, request: &VisionRequest) -> Result<String> {
        debug!("POST {} (model {})", self.endpoint, self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.build_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ImageError::EmptyResponse)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
    detail: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}
