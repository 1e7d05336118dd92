use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::viability::router::{fetch_handler, submit_handler};
use crate::workflows::viability::{
    validation_router, ValidationPipeline, ValidationRequest, ValidationService,
};

fn request(text: &str) -> ValidationRequest {
    ValidationRequest {
        idea_text: text.to_string(),
        signals: strong_signals(),
    }
}

#[tokio::test]
async fn submit_handler_returns_created_record() {
    let (service, _) = build_service(Duration::from_secs(60));

    let response =
        submit_handler::<MemoryRepository>(State(Arc::new(service)), axum::Json(request(BIKE_SHOP_INVENTORY)))
            .await;

    assert_status(&response, StatusCode::CREATED);
    let payload = body_json(response).await;
    assert_eq!(payload["result"]["status"], json!("GO"));
    assert!(payload["id"].as_str().is_some_and(|id| id.starts_with("val-")));
    assert!(payload["result"]["adjustments"].is_array());
}

#[tokio::test]
async fn submit_handler_maps_thin_text_to_unprocessable() {
    let (service, _) = build_service(Duration::from_secs(60));

    let response =
        submit_handler::<MemoryRepository>(State(Arc::new(service)), axum::Json(request("hmm")))
            .await;

    assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
    let payload = body_json(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("too thin")));
}

#[tokio::test]
async fn submit_handler_maps_blank_text_to_bad_request() {
    let (service, _) = build_service(Duration::from_secs(60));

    let response =
        submit_handler::<MemoryRepository>(State(Arc::new(service)), axum::Json(request("  ")))
            .await;

    assert_status(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submit_handler_maps_conflicts() {
    let service = ValidationService::new(
        ValidationPipeline::default(),
        Arc::new(ConflictRepository),
        Duration::from_secs(60),
    );

    let response = submit_handler::<ConflictRepository>(
        State(Arc::new(service)),
        axum::Json(request(BIKE_SHOP_INVENTORY)),
    )
    .await;

    assert_status(&response, StatusCode::CONFLICT);
}

#[tokio::test]
async fn submit_handler_maps_unavailable_repository() {
    let service = ValidationService::new(
        ValidationPipeline::default(),
        Arc::new(UnavailableRepository),
        Duration::from_secs(60),
    );

    let response = submit_handler::<UnavailableRepository>(
        State(Arc::new(service)),
        axum::Json(request(BIKE_SHOP_INVENTORY)),
    )
    .await;

    assert_status(&response, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn fetch_handler_returns_stored_and_missing_records() {
    let (service, _) = build_service(Duration::from_secs(60));
    let service = Arc::new(service);
    let record = service
        .submit(request(CROWDED_PROJECT_TOOL))
        .await
        .expect("submission succeeds");

    let found =
        fetch_handler::<MemoryRepository>(State(service.clone()), Path(record.id.0.clone())).await;
    assert_status(&found, StatusCode::OK);
    let payload = body_json(found).await;
    assert_eq!(payload["result"]["status"], json!("NO-GO"));

    let missing =
        fetch_handler::<MemoryRepository>(State(service), Path("val-unknown".to_string())).await;
    assert_status(&missing, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn router_accepts_json_submissions() {
    let (service, _) = build_service(Duration::from_secs(60));
    let router = validation_router(Arc::new(service));

    let body = json!({
        "idea_text": BIKE_SHOP_INVENTORY,
        "signals": { "ltv_estimate": 3000.0, "cac_estimate": 400.0 }
    });
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/validations")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&body).expect("serialize"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_status(&response, StatusCode::CREATED);
    let payload = body_json(response).await;
    assert_eq!(payload["result"]["unit_economics"]["ltv_to_cac"], json!(7.5));
}

#[tokio::test]
async fn router_fetches_by_path() {
    let (service, _) = build_service(Duration::from_secs(60));
    let service = Arc::new(service);
    let record = service
        .submit(request(BIKE_SHOP_INVENTORY))
        .await
        .expect("submission succeeds");
    let router = validation_router(service);

    let response = router
        .oneshot(
            axum::http::Request::get(format!("/api/v1/validations/{}", record.id))
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_status(&response, StatusCode::OK);
    let payload = body_json(response).await;
    assert_eq!(payload["id"], json!(record.id.0));
}
