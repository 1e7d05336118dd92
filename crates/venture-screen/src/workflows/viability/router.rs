use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::pipeline::ValidationError;
use super::repository::{RepositoryError, ResultRepository, ValidationId};
use super::service::{ValidationRequest, ValidationService, ValidationServiceError};

/// Router builder exposing HTTP endpoints for submitting and fetching validations.
pub fn validation_router<R>(service: Arc<ValidationService<R>>) -> Router
where
    R: ResultRepository + 'static,
{
    Router::new()
        .route("/api/v1/validations", post(submit_handler::<R>))
        .route("/api/v1/validations/:validation_id", get(fetch_handler::<R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ValidationService<R>>>,
    axum::Json(request): axum::Json<ValidationRequest>,
) -> Response
where
    R: ResultRepository + 'static,
{
    match service.submit(request).await {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(ValidationServiceError::Validation(
            error @ ValidationError::InsufficientSignal { .. },
        )) => error_response(StatusCode::UNPROCESSABLE_ENTITY, error.to_string()),
        Err(ValidationServiceError::Validation(error)) => {
            error_response(StatusCode::BAD_REQUEST, error.to_string())
        }
        Err(ValidationServiceError::Repository(RepositoryError::Conflict)) => {
            error_response(StatusCode::CONFLICT, "validation already exists".to_string())
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<ValidationService<R>>>,
    Path(validation_id): Path<String>,
) -> Response
where
    R: ResultRepository + 'static,
{
    let id = ValidationId(validation_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(ValidationServiceError::Repository(RepositoryError::NotFound)) => error_response(
            StatusCode::NOT_FOUND,
            format!("validation {id} not found or expired"),
        ),
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}
