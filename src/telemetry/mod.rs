//! Logging topology and telemetry gate.
//!
//! # Data Flow
//! ```text
//! handler
//!     → Telemetry::emit(channel, level, message)
//!         → console (tracing event, always)
//!         → TelemetrySink (gate enabled AND channel on allow-list)
//!             → InsightsSink → OpenTelemetry batch processor → Application Insights
//! ```
//!
//! # Design Decisions
//! - The gate is decided once, from the connection string, and never changes
//! - Exclusion is a static name-based allow-list (see `channel.rs`)
//! - `Telemetry` is constructed explicitly and injected; there is no global

pub mod channel;
pub mod error;
pub mod insights;
pub mod severity;
pub mod sink;

use std::fmt;
use std::sync::Arc;

pub use channel::{
    Channel, ChannelRegistry, Channels, API_CHANNEL, BUSINESS_CHANNEL, ROOT_CHANNEL,
    UNTRACKED_CHANNEL,
};
pub use error::TelemetryError;
pub use insights::InsightsSink;
pub use severity::{Severity, UnknownSeverity};
pub use sink::{ExportRecord, LogFormat, MemorySink, TelemetrySink};

use crate::observability::metrics;

/// Target of the console events produced by channels.
pub const CONSOLE_TARGET: &str = "insights_demo::channel";

/// Name of the environment variable holding the connection string.
pub const CONNECTION_STRING_ENV: &str = "APPLICATIONINSIGHTS_CONNECTION_STRING";

/// Process-wide channel registry plus export gate.
pub struct Telemetry {
    sink: Option<Arc<dyn TelemetrySink>>,
    registry: ChannelRegistry,
}

impl Telemetry {
    /// Configure telemetry from an optional connection string.
    ///
    /// A present, non-blank credential enables the gate and builds the
    /// Application Insights exporter; anything else leaves it disabled.
    pub fn initialize(credential: Option<&str>) -> Result<Self, TelemetryError> {
        let credential = credential.map(str::trim).filter(|c| !c.is_empty());
        let sink: Option<Arc<dyn TelemetrySink>> = match credential {
            Some(connection_string) => {
                Some(Arc::new(InsightsSink::from_connection_string(connection_string)?))
            }
            None => None,
        };
        Ok(Self::with_sink(sink))
    }

    /// Build with an explicit sink. `None` means the gate is disabled.
    pub fn with_sink(sink: Option<Arc<dyn TelemetrySink>>) -> Self {
        let telemetry = Self {
            sink,
            registry: ChannelRegistry::new(),
        };

        let root = telemetry.channel(ROOT_CHANNEL);
        if telemetry.is_enabled() {
            telemetry.emit(
                &root,
                Severity::Info,
                "Azure Application Insights configured successfully",
            );
        } else {
            telemetry.emit(
                &root,
                Severity::Warning,
                "APPLICATIONINSIGHTS_CONNECTION_STRING not found - Azure monitoring disabled",
            );
        }
        telemetry
    }

    /// Whether exported channels reach the backend.
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Get or create the channel bound to `name`.
    pub fn channel(&self, name: &str) -> Channel {
        self.registry.get_or_create(name)
    }

    /// Resolve the channels used by the HTTP handlers.
    pub fn channels(&self) -> Channels {
        Channels::resolve(&self.registry)
    }

    /// Write `message` to the console and, when allowed, to the backend.
    ///
    /// Returns `true` if the record was handed to the sink.
    pub fn emit(&self, channel: &Channel, level: Severity, message: &str) -> bool {
        if !channel.accepts(level) {
            return false;
        }

        let name = channel.name();
        match level {
            Severity::Info => tracing::info!(target: CONSOLE_TARGET, channel = %name, "{}", message),
            Severity::Warning => tracing::warn!(target: CONSOLE_TARGET, channel = %name, "{}", message),
            Severity::Error => tracing::error!(target: CONSOLE_TARGET, channel = %name, "{}", message),
        }

        let exported = match &self.sink {
            Some(sink) if channel.is_exported() => {
                sink.export(&ExportRecord::new(name, level, message));
                true
            }
            _ => false,
        };
        metrics::record_log(name, level, exported);
        exported
    }

    pub fn info(&self, channel: &Channel, message: &str) -> bool {
        self.emit(channel, Severity::Info, message)
    }

    pub fn warning(&self, channel: &Channel, message: &str) -> bool {
        self.emit(channel, Severity::Warning, message)
    }

    pub fn error(&self, channel: &Channel, message: &str) -> bool {
        self.emit(channel, Severity::Error, message)
    }

    /// Flush and stop the exporter, if any.
    pub fn shutdown(&self) {
        if let Some(sink) = &self.sink {
            sink.shutdown();
        }
    }
}

impl fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telemetry")
            .field("enabled", &self.is_enabled())
            .field("channels", &self.registry.len())
            .finish()
    }
}
