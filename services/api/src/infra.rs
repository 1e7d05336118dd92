use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use venture_screen::error::AppError;
use venture_screen::workflows::viability::{
    RawSignals, RepositoryError, ResultRepository, StoredValidation, ValidationId,
    ValidationPipeline,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) pipeline: Arc<ValidationPipeline>,
}

/// Process-local result store. Expired records stay invisible to `fetch` until the
/// purge task removes them.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResultRepository {
    records: Arc<Mutex<HashMap<ValidationId, StoredValidation>>>,
}

impl ResultRepository for InMemoryResultRepository {
    fn insert(&self, record: StoredValidation) -> Result<StoredValidation, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".into()))?;
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
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".into()))?;
        Ok(guard.get(id).filter(|record| !record.is_expired(now)).cloned())
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".into()))?;
        let before = guard.len();
        guard.retain(|_, record| !record.is_expired(now));
        Ok(before - guard.len())
    }
}

/// Read founder signals from a JSON file; missing fields take their defaults.
pub(crate) fn load_signals(path: Option<&Path>) -> Result<RawSignals, AppError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str(&raw).map_err(AppError::Signals)
        }
        None => Ok(RawSignals::default()),
    }
}
