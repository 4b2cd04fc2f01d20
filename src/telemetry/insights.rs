//! Azure Application Insights sink.
//!
//! Records are converted into OpenTelemetry log records and shipped by a
//! batch processor running on the Tokio runtime, so `export` never waits on
//! the network.

use std::time::SystemTime;

use opentelemetry::logs::{
    AnyValue, LogRecord as _, Logger as _, LoggerProvider as _, Severity as OtelSeverity,
};
use opentelemetry::KeyValue;
use opentelemetry_sdk::logs::{Logger, LoggerProvider};
use opentelemetry_sdk::{runtime, Resource};

use super::channel::ROOT_CHANNEL;
use super::error::TelemetryError;
use super::sink::{ExportRecord, LogFormat, TelemetrySink};
use super::Severity;

/// Exports records to Application Insights via OpenTelemetry logs.
pub struct InsightsSink {
    provider: LoggerProvider,
    logger: Logger,
    format: LogFormat,
}

impl InsightsSink {
    /// Build the exporter from a connection string.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn from_connection_string(connection_string: &str) -> Result<Self, TelemetryError> {
        let exporter = opentelemetry_application_insights::Exporter::new_from_connection_string(
            connection_string,
            reqwest::Client::new(),
        )
        .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

        let provider = LoggerProvider::builder()
            .with_resource(Resource::new(vec![
                KeyValue::new("service.name", ROOT_CHANNEL),
                KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            ]))
            .with_batch_exporter(exporter, runtime::Tokio)
            .build();
        let logger = provider.logger(ROOT_CHANNEL);

        Ok(Self {
            provider,
            logger,
            format: LogFormat,
        })
    }
}

fn otel_severity(level: Severity) -> OtelSeverity {
    match level {
        Severity::Info => OtelSeverity::Info,
        Severity::Warning => OtelSeverity::Warn,
        Severity::Error => OtelSeverity::Error,
    }
}

impl TelemetrySink for InsightsSink {
    fn export(&self, record: &ExportRecord) {
        let mut log = self.logger.create_log_record();
        log.set_timestamp(SystemTime::from(record.timestamp));
        log.set_severity_number(otel_severity(record.level));
        log.set_body(AnyValue::from(self.format.render(record)));
        log.add_attribute("logger_name", record.channel.clone());
        self.logger.emit(log);
    }

    fn shutdown(&self) {
        if let Err(e) = self.provider.shutdown() {
            tracing::warn!(error = %e, "Telemetry shutdown failed");
        }
    }
}
