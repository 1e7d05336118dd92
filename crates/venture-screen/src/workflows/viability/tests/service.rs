use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use super::common::*;
use crate::workflows::viability::domain::{RawSignals, ValidationStatus};
use crate::workflows::viability::repository::{RepositoryError, ValidationId};
use crate::workflows::viability::{
    ValidationError, ValidationPipeline, ValidationRequest, ValidationService,
    ValidationServiceError, MAX_IDEA_LENGTH,
};

fn request(text: &str) -> ValidationRequest {
    ValidationRequest {
        idea_text: text.to_string(),
        signals: strong_signals(),
    }
}

#[tokio::test]
async fn submit_stores_result_under_fresh_id() {
    let (service, repository) = build_service(Duration::from_secs(3_600));

    let first = service
        .submit(request(BIKE_SHOP_INVENTORY))
        .await
        .expect("submission succeeds");
    let second = service
        .submit(request(CROWDED_PROJECT_TOOL))
        .await
        .expect("submission succeeds");

    assert_ne!(first.id, second.id);
    assert!(first.id.0.starts_with("val-"));
    assert_eq!(first.result.status, ValidationStatus::Go);
    assert_eq!(second.result.status, ValidationStatus::NoGo);
    assert_eq!(
        repository
            .records
            .lock()
            .expect("repository mutex poisoned")
            .len(),
        2
    );

    let fetched = service.get(&first.id).expect("record present");
    assert_eq!(fetched.result, first.result);
}

#[tokio::test]
async fn submit_trims_text_before_validating() {
    let (service, _) = build_service(Duration::from_secs(60));

    let padded = format!("   {BIKE_SHOP_INVENTORY}\n");
    let record = service
        .submit(request(&padded))
        .await
        .expect("submission succeeds");

    let direct = ValidationPipeline::default()
        .validate(BIKE_SHOP_INVENTORY, &strong_signals())
        .expect("idea classifies");
    assert_eq!(record.result, direct);
}

#[tokio::test]
async fn submit_rejects_blank_and_oversized_text() {
    let (service, repository) = build_service(Duration::from_secs(60));

    let blank = service.submit(request("   ")).await;
    assert!(matches!(
        blank,
        Err(ValidationServiceError::Validation(ValidationError::EmptyIdea))
    ));

    let oversized = "a".repeat(MAX_IDEA_LENGTH + 1);
    let too_long = service.submit(request(&oversized)).await;
    assert!(matches!(
        too_long,
        Err(ValidationServiceError::Validation(ValidationError::IdeaTooLong { .. }))
    ));

    assert!(repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .is_empty());
}

#[tokio::test]
async fn unclassifiable_text_is_not_stored() {
    let (service, repository) = build_service(Duration::from_secs(60));

    let result = service
        .submit(ValidationRequest {
            idea_text: "hmm".to_string(),
            signals: RawSignals::default(),
        })
        .await;

    assert!(matches!(
        result,
        Err(ValidationServiceError::Validation(
            ValidationError::InsufficientSignal { .. }
        ))
    ));
    assert!(repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .is_empty());
}

#[tokio::test]
async fn expired_results_are_not_found_and_purged() {
    let (service, _) = build_service(Duration::from_secs(60));

    let record = service
        .submit(request(BIKE_SHOP_INVENTORY))
        .await
        .expect("submission succeeds");
    let later = record.expires_at + chrono::Duration::seconds(1);

    assert!(service.get_at(&record.id, Utc::now()).is_ok());
    assert!(matches!(
        service.get_at(&record.id, later),
        Err(ValidationServiceError::Repository(RepositoryError::NotFound))
    ));
    assert_eq!(service.purge_expired(later).expect("purge succeeds"), 1);
}

#[test]
fn unknown_id_is_not_found() {
    let (service, _) = build_service(Duration::from_secs(60));

    let result = service.get(&ValidationId("val-missing".to_string()));

    assert!(matches!(
        result,
        Err(ValidationServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[tokio::test]
async fn repository_failures_surface_to_callers() {
    let service = ValidationService::new(
        ValidationPipeline::default(),
        Arc::new(UnavailableRepository),
        Duration::from_secs(60),
    );

    let result = service.submit(request(BIKE_SHOP_INVENTORY)).await;

    assert!(matches!(
        result,
        Err(ValidationServiceError::Repository(
            RepositoryError::Unavailable(_)
        ))
    ));
}
