use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::viability::{BatchImportError, ValidationError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Validation(ValidationError),
    Batch(BatchImportError),
    Signals(serde_json::Error),
    Output(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Validation(err) => write!(f, "validation error: {}", err),
            AppError::Batch(err) => write!(f, "batch error: {}", err),
            AppError::Signals(err) => write!(f, "invalid signals: {}", err),
            AppError::Output(err) => write!(f, "failed to render output: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Validation(err) => Some(err),
            AppError::Batch(err) => Some(err),
            AppError::Signals(err) => Some(err),
            AppError::Output(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation(ValidationError::InsufficientSignal { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Validation(_) | AppError::Batch(_) | AppError::Signals(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Output(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<BatchImportError> for AppError {
    fn from(value: BatchImportError) -> Self {
        Self::Batch(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_signal_maps_to_unprocessable() {
        let response = AppError::from(ValidationError::InsufficientSignal {
            confidence: 0.1,
            minimum: 0.4,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn request_shape_errors_map_to_bad_request() {
        let response = AppError::from(ValidationError::EmptyIdea).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn output_failures_are_not_reported_as_bad_signals() {
        let parse = || serde_json::from_str::<serde_json::Value>("{").unwrap_err();

        let input = AppError::Signals(parse());
        assert!(input.to_string().starts_with("invalid signals"));
        assert_eq!(input.into_response().status(), StatusCode::BAD_REQUEST);

        let output = AppError::Output(parse());
        assert!(output.to_string().starts_with("failed to render output"));
        assert_eq!(
            output.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
