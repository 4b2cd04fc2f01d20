//! Telemetry error types.

use thiserror::Error;

/// Failures while wiring up the telemetry backend at startup.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to configure Application Insights exporter: {0}")]
    Exporter(String),
}
