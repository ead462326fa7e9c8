//! Application startup and lifecycle management.

use crate::config::RiskConfig;
use crate::handlers;
use crate::services::{ArtifactRiskModel, RiskModel};
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state. Built once at startup, immutable afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: RiskConfig,
    pub model: Arc<dyn RiskModel>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Artifact load failure is fatal here, never deferred to a request.
    pub async fn build(config: RiskConfig) -> Result<Self, AppError> {
        let model = ArtifactRiskModel::load(
            Path::new(&config.artifacts.model_path),
            Path::new(&config.artifacts.scaler_path),
            Path::new(&config.artifacts.mapping_path),
        )
        .map_err(|e| {
            tracing::error!("Failed to load risk model artifacts: {}", e);
            AppError::from(e)
        })?;
        let model: Arc<dyn RiskModel> = Arc::new(model);

        let state = AppState {
            config: config.clone(),
            model,
        };

        // The original service sits behind a browser client on another
        // origin, so CORS stays permissive.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics_endpoint))
            .route("/api/predict_risk", post(handlers::predict_risk))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(state);

        // Port 0 = random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
