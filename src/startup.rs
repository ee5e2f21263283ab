//! Application startup and lifecycle management.
//!
//! Builds the router (API routes, CORS policy, static fallback) and runs the
//! server until a shutdown signal arrives.

use crate::config::AppConfig;
use crate::cors::OriginPolicy;
use crate::error::AppError;
use crate::handlers::{fallback_page, generate_image, health_check, test_cors};
use crate::services::providers::ImageProvider;
use axum::{
    handler::HandlerWithoutStateExt,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub image_provider: Arc<dyn ImageProvider>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Bind the listener and build the router. Port 0 yields a random port
    /// for testing.
    pub async fn build(
        config: AppConfig,
        image_provider: Arc<dyn ImageProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            image_provider,
        };
        let router = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            environment = config.environment.as_str(),
            "imagegen-service listening"
        );

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

pub fn build_router(state: AppState) -> Router {
    let policy = OriginPolicy::new(state.config.environment, &state.config.cors);
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request_parts: &axum::http::request::Parts| {
                policy.permits(origin.to_str().ok())
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // Non-API routes serve the frontend when present, a status page otherwise.
    let static_service = ServeDir::new(&state.config.static_dir)
        .not_found_service(fallback_page.into_service());

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/test-cors", get(test_cors))
        .route("/api/generate-image", post(generate_image))
        .fallback_service(static_service)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
