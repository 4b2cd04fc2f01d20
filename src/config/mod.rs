//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → optional TOML file (loader.rs)
//!     → environment overlay (PORT, APPLICATIONINSIGHTS_CONNECTION_STRING, WEBSITE_*)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so the service runs with no config at all
//! - Environment wins over the file, matching how App Service injects settings

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, ConfigError};
pub use schema::{
    AppConfig, DeploymentConfig, ListenerConfig, ObservabilityConfig, TelemetryConfig,
    TimeoutConfig,
};
