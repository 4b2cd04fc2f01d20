//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::telemetry::CONNECTION_STRING_ENV;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML file into a configuration without validating it.
pub fn load_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Overlay environment settings onto `config`.
///
/// `lookup` abstracts `std::env::var` so tests do not touch the process env.
/// Empty values count as unset.
pub fn apply_env<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.is_empty());

    if let Some(port) = get("PORT") {
        config.listener.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { var: "PORT", value: port.clone() })?;
    }

    if let Some(connection_string) = get(CONNECTION_STRING_ENV) {
        config.telemetry.connection_string = Some(connection_string);
    }

    let deployment = &mut config.deployment;
    for (var, slot) in [
        ("WEBSITE_SITE_NAME", &mut deployment.site_name),
        ("WEBSITE_RESOURCE_GROUP", &mut deployment.resource_group),
        ("WEBSITE_OWNER_NAME", &mut deployment.subscription_id),
        ("WEBSITE_SITE_REGION", &mut deployment.region),
        ("WEBSITE_INSTANCE_ID", &mut deployment.instance_id),
        ("WEBSITE_HOSTNAME", &mut deployment.hostname),
    ] {
        if let Some(value) = get(var) {
            *slot = Some(value);
        }
    }

    Ok(())
}

/// Load configuration: defaults, then the optional file, then the process
/// environment, then validation.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_file(path)?,
        None => AppConfig::default(),
    };
    apply_env(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
