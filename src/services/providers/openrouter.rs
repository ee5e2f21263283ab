//! OpenRouter provider implementation.
//!
//! Sends a single chat-completion request with the image modality and
//! extracts the generated image URLs from the response.

use super::{ImageProvider, ProviderError};
use crate::config::OpenRouterConfig;
use crate::models::GeneratedImage;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenRouter API base URL.
const OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";

pub struct OpenRouterProvider {
    api_key: String,
    timeout_secs: u64,
    client: Client,
}

impl OpenRouterProvider {
    pub fn new(config: &OpenRouterConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
            client,
        }
    }
}

#[async_trait]
impl ImageProvider for OpenRouterProvider {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
    ) -> Result<Vec<GeneratedImage>, ProviderError> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            modalities: vec!["image".to_string()],
        };

        tracing::debug!(
            model = %model,
            prompt_len = prompt.len(),
            "Sending request to OpenRouter"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", OPENROUTER_API_BASE))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_secs)
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        extract_images(api_response)
    }
}

/// Pull the ordered image list out of a chat-completion response.
fn extract_images(response: ChatCompletionResponse) -> Result<Vec<GeneratedImage>, ProviderError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Malformed("response has no choices".to_string()))?;

    let message = choice
        .message
        .ok_or_else(|| ProviderError::Malformed("choice has no message".to_string()))?;

    let images = message
        .images
        .ok_or_else(|| ProviderError::Malformed("message has no images field".to_string()))?;

    if images.is_empty() {
        return Err(ProviderError::Empty);
    }

    Ok(images
        .into_iter()
        .map(|img| GeneratedImage {
            url: img.image_url.url,
            size: img.image_url.size,
        })
        .collect())
}

// ============================================================================
// OpenRouter API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    modalities: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    images: Option<Vec<ImageEntry>>,
}

#[derive(Debug, Deserialize)]
struct ImageEntry {
    image_url: ImageUrl,
}

#[derive(Debug, Deserialize)]
struct ImageUrl {
    url: String,
    #[serde(default)]
    size: Option<String>,
}
