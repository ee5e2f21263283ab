//! Mock provider implementation for testing.

use super::{ImageProvider, ProviderError};
use crate::models::GeneratedImage;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

enum Behavior {
    Succeed(Vec<GeneratedImage>),
    Fail(String),
    Delay(Duration, Vec<GeneratedImage>),
}

/// Mock image provider with a call counter, so tests can assert how many
/// upstream calls a request produced.
pub struct MockImageProvider {
    behavior: Behavior,
    calls: Arc<AtomicUsize>,
}

impl MockImageProvider {
    pub fn returning(images: Vec<GeneratedImage>) -> Self {
        Self {
            behavior: Behavior::Succeed(images),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fails every call with an API error carrying the given detail.
    pub fn failing(detail: &str) -> Self {
        Self {
            behavior: Behavior::Fail(detail.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Succeeds only after sleeping for `delay`.
    pub fn delayed(delay: Duration, images: Vec<GeneratedImage>) -> Self {
        Self {
            behavior: Behavior::Delay(delay, images),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Counter shared with the provider; clone before handing the provider
    /// to the application.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate(
        &self,
        _prompt: &str,
        _model: &str,
    ) -> Result<Vec<GeneratedImage>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            Behavior::Succeed(images) => Ok(images.clone()),
            Behavior::Fail(detail) => Err(ProviderError::Api {
                status: 502,
                body: detail.clone(),
            }),
            Behavior::Delay(delay, images) => {
                tokio::time::sleep(*delay).await;
                Ok(images.clone())
            }
        }
    }
}
