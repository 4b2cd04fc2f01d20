//! Metrics collection and exposition.
//!
//! # Metrics
//! - `demo_log_records_total` (counter): records emitted by channel, level, exported
//! - `demo_requests_total` (counter): requests by method, route, status
//! - `demo_request_duration_seconds` (histogram): handler latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::telemetry::Severity;

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one channel emission.
pub fn record_log(channel: &str, level: Severity, exported: bool) {
    counter!(
        "demo_log_records_total",
        "channel" => channel.to_string(),
        "level" => level.as_str(),
        "exported" => if exported { "true" } else { "false" }
    )
    .increment(1);
}

/// Count one finished request and its latency.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let status = status.to_string();
    counter!(
        "demo_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "demo_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}
