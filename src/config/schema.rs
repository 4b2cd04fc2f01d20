//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the demo service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Telemetry backend settings.
    pub telemetry: TelemetryConfig,

    /// Deployment metadata reported by `/app-info`.
    pub deployment: DeploymentConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Console logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port. Overridden by `PORT`.
    pub port: u16,
}

impl ListenerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Telemetry backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Application Insights connection string. Absent means export is disabled.
    pub connection_string: Option<String>,
}

impl TelemetryConfig {
    pub fn is_configured(&self) -> bool {
        self.connection_string
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }
}

/// App Service deployment metadata. Surfaced verbatim, never interpreted.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DeploymentConfig {
    /// `WEBSITE_SITE_NAME`. Its presence marks an App Service deployment.
    pub site_name: Option<String>,

    /// `WEBSITE_RESOURCE_GROUP`.
    pub resource_group: Option<String>,

    /// `WEBSITE_OWNER_NAME`.
    pub subscription_id: Option<String>,

    /// `WEBSITE_SITE_REGION`.
    pub region: Option<String>,

    /// `WEBSITE_INSTANCE_ID`.
    pub instance_id: Option<String>,

    /// `WEBSITE_HOSTNAME`.
    pub hostname: Option<String>,
}

impl DeploymentConfig {
    pub fn is_app_service(&self) -> bool {
        self.site_name.is_some()
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `EnvFilter` directives when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "insights_demo=info,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
