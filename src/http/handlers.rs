//! Endpoint handlers.
//!
//! Each handler picks a channel, emits one or more messages, and returns a
//! plain payload. Nothing is stored.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use crate::http::payload::{AppInfo, HealthResponse, LogMessage, LogResponse, UserData, UserResponse};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::telemetry::{Severity, API_CHANNEL, BUSINESS_CHANNEL, ROOT_CHANNEL};

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    state.telemetry.info(&state.channels.root, "Root endpoint accessed");
    Json(json!({
        "message": "Hello World! Check your Azure Application Insights for logs."
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    state.telemetry.info(&state.channels.api, "Health check endpoint accessed");
    let environment = if state.deployment.is_app_service() {
        "azure-app-service"
    } else {
        "local"
    };
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: ROOT_CHANNEL.to_string(),
        environment: environment.to_string(),
        insights_configured: state.telemetry.is_enabled(),
    })
}

pub async fn app_info(State(state): State<AppState>) -> Json<AppInfo> {
    state.telemetry.info(&state.channels.api, "App info endpoint accessed");

    let d = &state.deployment;
    let value_or = |value: &Option<String>, fallback: &str| {
        value.clone().unwrap_or_else(|| fallback.to_string())
    };
    let info = AppInfo {
        app_name: value_or(&d.site_name, "local"),
        resource_group: value_or(&d.resource_group, "N/A"),
        subscription_id: value_or(&d.subscription_id, "N/A"),
        region: value_or(&d.region, "N/A"),
        instance_id: value_or(&d.instance_id, "N/A"),
        hostname: value_or(&d.hostname, "localhost"),
        port: state.port,
        insights_enabled: state.telemetry.is_enabled(),
        service_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    state.telemetry.info(
        &state.channels.business,
        &format!("App running on: {} in region: {}", info.hostname, info.region),
    );
    Json(info)
}

pub async fn create_log(
    State(state): State<AppState>,
    payload: Result<Json<LogMessage>, JsonRejection>,
) -> Result<Json<LogResponse>, ApiError> {
    let Json(log) = payload?;
    let telemetry = &state.telemetry;
    let level = log.level.to_lowercase();

    telemetry.info(
        &state.channels.api,
        &format!("Log endpoint accessed with level: {level}"),
    );

    let severity: Severity = match level.parse() {
        Ok(severity) => severity,
        Err(_) => {
            telemetry.warning(
                &state.channels.api,
                &format!("Invalid log level requested: {level}"),
            );
            return Err(ApiError::InvalidLogLevel(level));
        }
    };

    telemetry.emit(
        &state.channels.root,
        severity,
        &format!("Custom {severity} log: {}", log.message),
    );
    telemetry.emit(
        &state.channels.business,
        severity,
        &format!("Business logic - {severity}: {}", log.message),
    );

    Ok(Json(LogResponse {
        status: "logged".to_string(),
        message: log.message,
        level,
    }))
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserData>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(user) = payload?;
    state.telemetry.info(
        &state.channels.api,
        &format!("User creation endpoint accessed for user: {}", user.name),
    );

    match register_user(&state, &user) {
        Ok(()) => Ok(Json(UserResponse {
            status: "success".to_string(),
            message: format!("User {} created successfully", user.name),
            user,
        })),
        Err(e) => {
            state.telemetry.error(
                &state.channels.business,
                &format!("Failed to create user {}: {}", user.name, e),
            );
            Err(e)
        }
    }
}

fn register_user(state: &AppState, user: &UserData) -> Result<(), ApiError> {
    let business = &state.channels.business;
    state.telemetry.info(
        business,
        &format!("Processing user creation for: {} ({})", user.name, user.email),
    );

    if let Some(age) = user.age.filter(|age| *age < 0) {
        state.telemetry.error(
            business,
            &format!("Invalid age provided for user {}: {}", user.name, age),
        );
        return Err(ApiError::NegativeAge(age));
    }

    state.telemetry.info(
        business,
        &format!("User successfully created: {}", user.name),
    );
    Ok(())
}

/// Integer division failure.
#[derive(Debug, thiserror::Error)]
#[error("division by zero")]
pub struct DivideByZero;

fn divide(numerator: i64, denominator: i64) -> Result<i64, DivideByZero> {
    numerator.checked_div(denominator).ok_or(DivideByZero)
}

pub async fn error_demo(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.telemetry.warning(
        &state.channels.api,
        "Error demo endpoint accessed - this will generate an error",
    );

    let denominator = std::hint::black_box(0);
    match divide(1, denominator) {
        Ok(result) => Ok(Json(json!({ "result": result }))),
        Err(e) => {
            state.telemetry.error(
                &state.channels.business,
                &format!("Intentional error for demo purposes: {e}"),
            );
            Err(ApiError::DivisionByZero)
        }
    }
}

pub async fn test_untracked(State(state): State<AppState>) -> Json<Value> {
    let telemetry = &state.telemetry;
    telemetry.info(&state.channels.api, "Testing untracked logger endpoint");

    let untracked = &state.channels.untracked;
    telemetry.info(untracked, "This info log won't be tracked");
    telemetry.warning(untracked, "This warning log won't be tracked");
    telemetry.error(untracked, "This error log won't be tracked");

    Json(json!({
        "message": "Untracked logs generated (check console vs Azure Application Insights)",
        "note": "The untracked logs should only appear in console, not in Azure Application Insights"
    }))
}

pub async fn log_all_levels(State(state): State<AppState>) -> Json<Value> {
    let telemetry = &state.telemetry;
    telemetry.info(&state.channels.api, "Generating logs at all levels");

    let tracked = [
        (&state.channels.root, "Main logger"),
        (&state.channels.api, "API logger"),
        (&state.channels.business, "Business logger"),
    ];
    for (channel, label) in tracked {
        for level in Severity::ALL {
            telemetry.emit(channel, level, &format!("{label} - {level} message"));
        }
    }

    Json(json!({
        "message": "All log levels generated",
        "loggers_used": [ROOT_CHANNEL, API_CHANNEL, BUSINESS_CHANNEL]
    }))
}
