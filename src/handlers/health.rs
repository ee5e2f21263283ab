use axum::{response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;

/// Liveness probe. Carries no configuration data.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "imagegen-service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
    }))
}
