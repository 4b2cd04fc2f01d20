//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, metrics)
//! - Bind server to listener
//! - Emit startup and shutdown messages on the service channels

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{AppConfig, DeploymentConfig};
use crate::http::handlers;
use crate::http::middleware::track_metrics;
use crate::http::request::{request_id, RequestUuid};
use crate::telemetry::{Channels, Telemetry};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub telemetry: Arc<Telemetry>,
    pub channels: Channels,
    pub deployment: Arc<DeploymentConfig>,
    pub port: u16,
}

/// HTTP server for the demo service.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and telemetry.
    pub fn new(config: AppConfig, telemetry: Arc<Telemetry>) -> Self {
        let state = AppState {
            channels: telemetry.channels(),
            telemetry,
            deployment: Arc::new(config.deployment.clone()),
            port: config.listener.port,
        };

        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            config,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/app-info", get(handlers::app_info))
            .route("/log", post(handlers::create_log))
            .route("/user", post(handlers::create_user))
            .route("/error-demo", get(handlers::error_demo))
            .route("/test-untracked", get(handlers::test_untracked))
            .route("/log-all-levels", get(handlers::log_all_levels))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request)
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(RequestUuid))
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            insights_enabled = self.state.telemetry.is_enabled(),
            "HTTP server starting"
        );

        let telemetry = &self.state.telemetry;
        let channels = &self.state.channels;
        telemetry.info(&channels.root, "Application starting up");
        telemetry.info(&channels.api, "API routes initialized");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        telemetry.info(&channels.root, "Application shutting down");
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the state shared with handlers.
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
