use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use venture_screen::error::AppError;
use venture_screen::workflows::viability::{
    screen_batch, validation_router, BatchImporter, BatchOutcome, RawSignals, ResultRepository,
    ValidationService,
};

/// Batch screening payload: CSV text with `id,idea_text` columns plus shared signals.
#[derive(Debug, Deserialize)]
pub(crate) struct BatchRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) signals: RawSignals,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchResponse {
    pub(crate) screened: usize,
    pub(crate) failed: usize,
    pub(crate) outcomes: Vec<BatchOutcome>,
}

pub(crate) fn with_validation_routes<R>(service: Arc<ValidationService<R>>) -> axum::Router
where
    R: ResultRepository + 'static,
{
    validation_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/validations/batch",
            axum::routing::post(batch_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn batch_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let ideas = BatchImporter::from_reader(Cursor::new(payload.csv.into_bytes()))?;
    let outcomes = screen_batch(&state.pipeline, &ideas, &payload.signals);
    let failed = outcomes
        .iter()
        .filter(|outcome| outcome.error.is_some())
        .count();

    Ok(Json(BatchResponse {
        screened: outcomes.len() - failed,
        failed,
        outcomes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use venture_screen::workflows::viability::{ValidationPipeline, ValidationStatus};

    fn state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
            pipeline: Arc::new(ValidationPipeline::default()),
        }
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let initializing = readiness_endpoint(Extension(state(false)))
            .await
            .into_response();
        assert_eq!(initializing.status(), StatusCode::SERVICE_UNAVAILABLE);

        let ready = readiness_endpoint(Extension(state(true))).await.into_response();
        assert_eq!(ready.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn batch_endpoint_screens_each_row() {
        let request = BatchRequest {
            csv: "id,idea_text\n\
kanban,\"Generic project management tool with kanban boards and Slack integration, $29/month\"\n\
blank,\n"
                .to_string(),
            signals: RawSignals::default(),
        };

        let Json(body) = batch_endpoint(Extension(state(true)), Json(request))
            .await
            .expect("batch screens");

        assert_eq!(body.screened, 1);
        assert_eq!(body.failed, 1);
        assert_eq!(body.outcomes[0].status, Some(ValidationStatus::NoGo));
    }

    #[tokio::test]
    async fn malformed_batch_csv_is_bad_request() {
        let request = BatchRequest {
            csv: "id\nonly-id\n".to_string(),
            signals: RawSignals::default(),
        };

        let err = batch_endpoint(Extension(state(true)), Json(request))
            .await
            .expect_err("missing column");

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
