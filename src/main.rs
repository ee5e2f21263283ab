use imagegen_service::config::AppConfig;
use imagegen_service::observability::init_tracing;
use imagegen_service::services::providers::openrouter::OpenRouterProvider;
use imagegen_service::services::providers::ImageProvider;
use imagegen_service::startup::Application;
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing("info");

    // Fail-fast: a missing OPENROUTER_API_KEY aborts startup.
    let config = AppConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let image_provider: Arc<dyn ImageProvider> =
        Arc::new(OpenRouterProvider::new(&config.openrouter));

    tracing::info!(
        model = %config.openrouter.model,
        timeout_secs = config.openrouter.timeout_secs,
        "Initialized OpenRouter image provider"
    );

    let app = Application::build(config, image_provider).await.map_err(|e| {
        tracing::error!("Failed to start application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
