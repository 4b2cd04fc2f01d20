//! Export records and the sink seam in front of the telemetry backend.

use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};

use super::Severity;

/// One message handed to the telemetry backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    pub timestamp: DateTime<Utc>,
    pub channel: String,
    pub level: Severity,
    pub message: String,
}

impl ExportRecord {
    pub fn new(channel: &str, level: Severity, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            channel: channel.to_string(),
            level,
            message: message.to_string(),
        }
    }
}

/// Fixed line layout for exported bodies: `timestamp - channel - LEVEL - message`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFormat;

impl LogFormat {
    pub fn render(&self, record: &ExportRecord) -> String {
        format!(
            "{} - {} - {} - {}",
            record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            record.channel,
            record.level.label(),
            record.message
        )
    }
}

/// Destination for exported records.
///
/// Implementations may buffer; `export` must not block on the network.
pub trait TelemetrySink: Send + Sync {
    fn export(&self, record: &ExportRecord);

    /// Flush anything buffered. Called once on process shutdown.
    fn shutdown(&self) {}
}

/// Sink that keeps records in memory. Useful for tests and local inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<ExportRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything exported so far.
    pub fn records(&self) -> Vec<ExportRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Records exported on `channel`.
    pub fn records_for(&self, channel: &str) -> Vec<ExportRecord> {
        self.records()
            .into_iter()
            .filter(|record| record.channel == channel)
            .collect()
    }
}

impl TelemetrySink for MemorySink {
    fn export(&self, record: &ExportRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
    }
}
