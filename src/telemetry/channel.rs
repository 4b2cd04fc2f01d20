//! Named log channels and the export allow-list.
//!
//! # Topology
//! ```text
//! insights-demo             (exported)
//! ├── insights-demo.api     (exported)
//! └── insights-demo.business (exported)
//! untracked-logger          (console only)
//! ```
//!
//! Eligibility is decided by name alone when a channel is first created and
//! never changes afterwards.

use std::sync::Arc;

use dashmap::DashMap;

use super::Severity;

/// Root of the exported hierarchy.
pub const ROOT_CHANNEL: &str = "insights-demo";
/// Request-handling channel.
pub const API_CHANNEL: &str = "insights-demo.api";
/// Business-logic channel.
pub const BUSINESS_CHANNEL: &str = "insights-demo.business";
/// Sibling of the root that never reaches the telemetry backend.
pub const UNTRACKED_CHANNEL: &str = "untracked-logger";

/// Minimum severity every channel is created with.
pub const DEFAULT_THRESHOLD: Severity = Severity::Info;

/// Whether output on `name` may be handed to the telemetry backend.
pub fn is_export_eligible(name: &str) -> bool {
    if name == UNTRACKED_CHANNEL {
        return false;
    }
    match name.strip_prefix(ROOT_CHANNEL) {
        Some("") => true,
        Some(rest) => rest.starts_with('.') && rest.len() > 1,
        None => false,
    }
}

/// Handle to a named channel. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    name: Arc<str>,
    threshold: Severity,
    exported: bool,
}

impl Channel {
    fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            threshold: DEFAULT_THRESHOLD,
            exported: is_export_eligible(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Whether this channel is on the export allow-list.
    pub fn is_exported(&self) -> bool {
        self.exported
    }

    /// Whether a message at `level` passes the threshold.
    pub fn accepts(&self, level: Severity) -> bool {
        level >= self.threshold
    }
}

/// Get-or-create registry of channels keyed by name.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: DashMap<String, Channel>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the channel bound to `name`, creating it on first use.
    pub fn get_or_create(&self, name: &str) -> Channel {
        if let Some(channel) = self.channels.get(name) {
            return channel.clone();
        }
        self.channels
            .entry(name.to_string())
            .or_insert_with(|| Channel::new(name))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// The four channels the HTTP layer logs on, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Channels {
    pub root: Channel,
    pub api: Channel,
    pub business: Channel,
    pub untracked: Channel,
}

impl Channels {
    pub fn resolve(registry: &ChannelRegistry) -> Self {
        Self {
            root: registry.get_or_create(ROOT_CHANNEL),
            api: registry.get_or_create(API_CHANNEL),
            business: registry.get_or_create(BUSINESS_CHANNEL),
            untracked: registry.get_or_create(UNTRACKED_CHANNEL),
        }
    }
}
