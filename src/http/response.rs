//! Error responses.
//!
//! Handlers return `Result<_, ApiError>`; the error is turned into a status
//! code plus a `{"detail": ...}` JSON body here, at the boundary.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors a handler can hand back to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid log level. Use 'info', 'warning', or 'error'")]
    InvalidLogLevel(String),

    #[error("Age cannot be negative")]
    NegativeAge(i64),

    #[error("Demo error: Division by zero")]
    DivisionByZero,

    /// Body missing, not JSON, or not the expected shape.
    #[error("{detail}")]
    InvalidBody { status: StatusCode, detail: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidLogLevel(_) | ApiError::NegativeAge(_) => StatusCode::BAD_REQUEST,
            ApiError::DivisionByZero => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidBody { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidLogLevel("debug".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NegativeAge(-1).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::DivisionByZero.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_body_keeps_status() {
        let err = ApiError::InvalidBody {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: "missing field `message`".into(),
        };
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "missing field `message`");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::DivisionByZero.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
