use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::workflows::viability::domain::{
    AttributeBag, BusinessDna, BusinessModel, CustomerType, Industry, Level, NetworkEffects,
    RawSignals, Scale, Stage,
};
use crate::workflows::viability::repository::{
    RepositoryError, ResultRepository, StoredValidation, ValidationId,
};
use crate::workflows::viability::{ValidationPipeline, ValidationService};

pub(super) const CROWDED_PROJECT_TOOL: &str =
    "Generic project management tool with kanban boards and Slack integration, $29/month";

pub(super) const BIKE_SHOP_INVENTORY: &str = "Inventory forecasting software for independent bike repair shops that predicts which parts to stock from past service tickets, sold to small business owners at $120/month";

pub(super) const P2P_LENDING: &str = "Peer-to-peer lending app that gives small business loans using alternative credit data, with a 2% origination fee";

/// Signals a well-prepared founder would bring: strong ratings, real demand
/// evidence, healthy unit economics, and low risk.
pub(super) fn strong_signals() -> RawSignals {
    RawSignals {
        unavoidable: 8.0,
        urgency: 8.0,
        underserved: 8.0,
        feasibility: 8.0,
        pain_gain_ratio: 8.0,
        whitespace: 8.0,
        competition_density: 2.0,
        willingness_to_pay: 8.0,
        interviews: Some(15.0),
        interviews_positive_pct: Some(80.0),
        lois: Some(3.0),
        ltv_estimate: Some(3000.0),
        cac_estimate: Some(400.0),
        channels_clarity: 8.0,
        team_experience: 8.0,
        capital_runway_months: 18.0,
        regulatory_risk: 2.0,
        platform_dependency_risk: 2.0,
        safety_risk: 1.0,
        tam_quality: 8.0,
        growth_quality: 8.0,
        attributes: AttributeBag::default()
            .with(AttributeBag::DISRUPTIVE, 7.0)
            .with(AttributeBag::DEFENSIBLE, 8.0)
            .with(AttributeBag::DISCONTINUOUS, 6.0),
        ..RawSignals::default()
    }
}

pub(super) fn saas_dna() -> BusinessDna {
    BusinessDna {
        industry: Industry::Saas,
        sub_industry: "inventory".to_string(),
        business_model: BusinessModel::Subscription,
        customer_type: CustomerType::B2b,
        stage: Stage::Idea,
        scale: Scale::National,
        capital_intensity: Level::Low,
        regulatory_complexity: Level::Low,
        network_effects: NetworkEffects::None,
        confidence: 0.9,
    }
}

pub(super) fn build_service(
    ttl: Duration,
) -> (ValidationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ValidationService::new(ValidationPipeline::default(), repository.clone(), ttl);
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ValidationId, StoredValidation>>>,
}

impl ResultRepository for MemoryRepository {
    fn insert(&self, record: StoredValidation) -> Result<StoredValidation, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(
        &self,
        id: &ValidationId,
        now: DateTime<Utc>,
    ) -> Result<Option<StoredValidation>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).filter(|record| !record.is_expired(now)).cloned())
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let before = guard.len();
        guard.retain(|_, record| !record.is_expired(now));
        Ok(before - guard.len())
    }
}

pub(super) struct ConflictRepository;

impl ResultRepository for ConflictRepository {
    fn insert(&self, _record: StoredValidation) -> Result<StoredValidation, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(
        &self,
        _id: &ValidationId,
        _now: DateTime<Utc>,
    ) -> Result<Option<StoredValidation>, RepositoryError> {
        Ok(None)
    }

    fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, RepositoryError> {
        Ok(0)
    }
}

pub(super) struct UnavailableRepository;

impl ResultRepository for UnavailableRepository {
    fn insert(&self, _record: StoredValidation) -> Result<StoredValidation, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _id: &ValidationId,
        _now: DateTime<Utc>,
    ) -> Result<Option<StoredValidation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) fn assert_status(response: &Response, status: StatusCode) {
    assert_eq!(response.status(), status);
}
