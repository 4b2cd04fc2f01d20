//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Channels and middleware produce:
//!     → logging.rs (console subscriber, stderr)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Operator console / App Service log stream
//!     → Metrics endpoint (Prometheus scrape)
//!     → Application Insights (via telemetry::InsightsSink, not this module)
//! ```

pub mod logging;
pub mod metrics;
