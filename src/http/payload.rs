//! Request and response bodies.

use serde::{Deserialize, Serialize};

/// Body of `POST /log`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogMessage {
    pub message: String,
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

/// Body of `POST /user`. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserData {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub age: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogResponse {
    pub status: String,
    pub message: String,
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub status: String,
    pub user: UserData,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub environment: String,
    pub insights_configured: bool,
}

/// Deployment metadata, as reported by `/app-info`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppInfo {
    pub app_name: String,
    pub resource_group: String,
    pub subscription_id: String,
    pub region: String,
    pub instance_id: String,
    pub hostname: String,
    pub port: u16,
    pub insights_enabled: bool,
    pub service_version: String,
}
