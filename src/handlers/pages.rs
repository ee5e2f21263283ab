use crate::startup::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse},
    Json,
};
use chrono::Utc;
use serde_json::json;

/// `GET /api/test-cors`: echoes the evaluated origin so deployed frontends
/// can verify their CORS configuration.
pub async fn test_cors(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none");

    Json(json!({
        "message": "CORS is working",
        "origin": origin,
        "timestamp": Utc::now(),
        "environment": state.config.environment.as_str(),
    }))
}

/// Served for any non-API path with no matching static file.
pub async fn fallback_page() -> Html<&'static str> {
    Html(FALLBACK_PAGE)
}

const FALLBACK_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Image Generator API</title>
    <style>
        body { font-family: Arial, sans-serif; text-align: center; padding: 50px; }
        h1 { color: #2563eb; }
        code { background: #f1f5f9; padding: 2px 6px; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>Image Generator API</h1>
    <p>Backend is running. Frontend files not found.</p>
    <p>Generate images at: <code>POST /api/generate-image</code></p>
    <p>Health check: <a href="/api/health">/api/health</a></p>
</body>
</html>
"#;
