//! Startup orchestration.
//!
//! Fail fast: a telemetry or bind error aborts startup.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::telemetry::{Telemetry, TelemetryError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the service until a termination signal arrives.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let telemetry = Arc::new(Telemetry::initialize(
        config.telemetry.connection_string.as_deref(),
    )?);

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        insights_enabled = telemetry.is_enabled(),
        app_service = config.deployment.is_app_service(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, telemetry.clone());
    let result = server.run(listener, shutdown.subscribe()).await;

    // The exporter's shutdown blocks until the batch processor drains.
    let flush = telemetry.clone();
    if let Err(e) = tokio::task::spawn_blocking(move || flush.shutdown()).await {
        tracing::warn!(error = %e, "Telemetry shutdown task failed");
    }
    result?;
    Ok(())
}
