//! End-to-end tests for the image generation endpoint, using the mock
//! provider so no network calls leave the process.

use imagegen_service::config::{
    AppConfig, CorsConfig, Environment, OpenRouterConfig, ServerConfig,
};
use imagegen_service::models::GeneratedImage;
use imagegen_service::services::providers::mock::MockImageProvider;
use imagegen_service::services::providers::ImageProvider;
use imagegen_service::startup::Application;
use reqwest::Client;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

const DEFAULT_MODEL: &str = "black-forest-labs/flux.2-klein-4b";

fn test_config(timeout_secs: u64) -> AppConfig {
    AppConfig {
        server: ServerConfig { port: 0 },
        environment: Environment::Development,
        openrouter: OpenRouterConfig {
            api_key: "test-secret-key".to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs,
        },
        cors: CorsConfig {
            allowed_origins: vec![],
            trusted_suffixes: vec![],
        },
        static_dir: "frontend".to_string(),
    }
}

async fn spawn_app(provider: Arc<dyn ImageProvider>, timeout_secs: u64) -> u16 {
    let app = Application::build(test_config(timeout_secs), provider)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    port
}

fn image(url: &str) -> GeneratedImage {
    GeneratedImage {
        url: url.to_string(),
        size: None,
    }
}

async fn post_generate(port: u16, body: serde_json::Value) -> reqwest::Response {
    Client::new()
        .post(format!("http://localhost:{}/api/generate-image", port))
        .json(&body)
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
async fn generate_returns_image_urls() {
    let provider = MockImageProvider::returning(vec![image("https://img.example/cat.png")]);
    let calls = provider.call_counter();
    let port = spawn_app(Arc::new(provider), 5).await;

    let response = post_generate(port, json!({"prompt": "a cyberpunk cat"})).await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["images"][0]["url"], "https://img.example/cat.png");
    assert_eq!(body["prompt"], "a cyberpunk cat");
    assert_eq!(body["model"], DEFAULT_MODEL);
    assert!(body["generatedAt"].is_string());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn generate_preserves_image_order() {
    let provider = MockImageProvider::returning(vec![
        image("https://img.example/1.png"),
        image("https://img.example/2.png"),
        image("https://img.example/3.png"),
    ]);
    let port = spawn_app(Arc::new(provider), 5).await;

    let response = post_generate(port, json!({"prompt": "three variations"})).await;
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");

    let urls: Vec<&str> = body["images"]
        .as_array()
        .expect("images should be an array")
        .iter()
        .map(|img| img["url"].as_str().unwrap())
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://img.example/1.png",
            "https://img.example/2.png",
            "https://img.example/3.png"
        ]
    );
}

#[tokio::test]
async fn caller_supplied_model_is_used_and_echoed() {
    let provider = MockImageProvider::returning(vec![image("https://img.example/x.png")]);
    let port = spawn_app(Arc::new(provider), 5).await;

    let response = post_generate(
        port,
        json!({"prompt": "a cat", "model": "stability/other-model"}),
    )
    .await;
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["model"], "stability/other-model");
}

#[tokio::test]
async fn empty_prompt_is_rejected_without_upstream_call() {
    let provider = MockImageProvider::returning(vec![image("https://img.example/x.png")]);
    let calls = provider.call_counter();
    let port = spawn_app(Arc::new(provider), 5).await;

    let response = post_generate(port, json!({"prompt": ""})).await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Prompt"));
    assert!(body["timestamp"].is_string());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn whitespace_only_prompt_is_rejected_without_upstream_call() {
    let provider = MockImageProvider::returning(vec![image("https://img.example/x.png")]);
    let calls = provider.call_counter();
    let port = spawn_app(Arc::new(provider), 5).await;

    let response = post_generate(port, json!({"prompt": "   \t  "})).await;
    assert_eq!(response.status(), 400);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn oversized_prompt_is_rejected_without_upstream_call() {
    let provider = MockImageProvider::returning(vec![image("https://img.example/x.png")]);
    let calls = provider.call_counter();
    let port = spawn_app(Arc::new(provider), 5).await;

    let response = post_generate(port, json!({"prompt": "x".repeat(1001)})).await;
    assert_eq!(response.status(), 400);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn prompt_at_the_limit_is_accepted() {
    let provider = MockImageProvider::returning(vec![image("https://img.example/x.png")]);
    let port = spawn_app(Arc::new(provider), 5).await;

    let response = post_generate(port, json!({"prompt": "x".repeat(1000)})).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn provider_failure_returns_generic_error() {
    let detail = "upstream exploded: secret internals";
    let provider = MockImageProvider::failing(detail);
    let port = spawn_app(Arc::new(provider), 5).await;

    let response = post_generate(port, json!({"prompt": "a cat"})).await;
    assert_eq!(response.status(), 500);

    let body = response.text().await.expect("Failed to read body");
    assert!(!body.contains(detail));

    let json: serde_json::Value = serde_json::from_str(&body).expect("Failed to parse JSON");
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Failed to generate image");
}

#[tokio::test]
async fn slow_provider_is_bounded_by_the_timeout() {
    let provider = MockImageProvider::delayed(
        Duration::from_secs(30),
        vec![image("https://img.example/slow.png")],
    );
    let port = spawn_app(Arc::new(provider), 1).await;

    let started = Instant::now();
    let response = post_generate(port, json!({"prompt": "a cat"})).await;
    let elapsed = started.elapsed();

    assert_eq!(response.status(), 500);
    assert!(
        elapsed < Duration::from_secs(5),
        "request took {:?}, expected it bounded by the 1s timeout",
        elapsed
    );

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Failed to generate image");
}
