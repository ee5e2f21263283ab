//! Image generation provider abstraction.
//!
//! The HTTP layer only ever talks to `ImageProvider`, so the real OpenRouter
//! client and the mock used in tests are interchangeable.

pub mod mock;
pub mod openrouter;

use crate::models::GeneratedImage;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Upstream returned no images")]
    Empty,

    #[error("Malformed upstream response: {0}")]
    Malformed(String),

    #[error("Upstream call timed out after {0}s")]
    Timeout(u64),
}

/// A service that turns a prompt into image references.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Issue exactly one generation call for the given prompt and model.
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
    ) -> Result<Vec<GeneratedImage>, ProviderError>;
}
