use crate::error::AppError;
use crate::models::{GenerateImageRequest, GenerateImageResponse, MAX_PROMPT_CHARS};
use crate::services::providers::ProviderError;
use crate::startup::AppState;
use axum::{extract::State, Json};
use chrono::Utc;
use std::time::Duration;
use validator::Validate;

/// `POST /api/generate-image`: validate the prompt, issue exactly one
/// upstream call, normalize the outcome.
pub async fn generate_image(
    State(state): State<AppState>,
    Json(payload): Json<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, AppError> {
    payload.validate()?;

    let prompt = payload.prompt.trim().to_string();
    if prompt.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!("Prompt is required")));
    }
    if prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Prompt must be at most {} characters",
            MAX_PROMPT_CHARS
        )));
    }

    let model = payload
        .model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| state.config.openrouter.model.clone());

    tracing::info!(
        model = %model,
        prompt_len = prompt.len(),
        "Generating image"
    );

    let timeout_secs = state.config.openrouter.timeout_secs;
    let bound = Duration::from_secs(timeout_secs);

    // Second timeout bound around the provider, so the request cannot hang
    // even if a provider implementation has no timeout of its own.
    let images = match tokio::time::timeout(bound, state.image_provider.generate(&prompt, &model))
        .await
    {
        Ok(result) => result?,
        Err(_) => return Err(AppError::Upstream(ProviderError::Timeout(timeout_secs))),
    };

    tracing::info!(image_count = images.len(), model = %model, "Image generation succeeded");

    Ok(Json(GenerateImageResponse {
        success: true,
        images,
        prompt,
        model,
        generated_at: Utc::now(),
    }))
}
