use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Upper bound on prompt length, counted in characters.
pub const MAX_PROMPT_CHARS: usize = 1000;

/// Inbound body for `POST /api/generate-image`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateImageRequest {
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Prompt must be between 1 and 1000 characters"
    ))]
    pub prompt: String,

    /// Optional model identifier; the configured default applies when absent.
    pub model: Option<String>,
}

/// One generated image reference returned by the upstream service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Successful response body for `POST /api/generate-image`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    pub success: bool,
    pub images: Vec<GeneratedImage>,
    pub prompt: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}
