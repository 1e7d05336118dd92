use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use super::domain::RawSignals;
use super::pipeline::{ValidationError, ValidationPipeline};
use super::repository::{RepositoryError, ResultRepository, StoredValidation, ValidationId};

/// Longest idea text accepted, in characters.
pub const MAX_IDEA_LENGTH: usize = 10_000;

/// Submission payload for a single idea.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationRequest {
    pub idea_text: String,
    #[serde(default)]
    pub signals: RawSignals,
}

/// Service composing the validation pipeline with result storage.
pub struct ValidationService<R> {
    pipeline: Arc<ValidationPipeline>,
    repository: Arc<R>,
    ttl: chrono::Duration,
}

static VALIDATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_validation_id() -> ValidationId {
    let id = VALIDATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ValidationId(format!("val-{id:06}"))
}

impl<R> ValidationService<R>
where
    R: ResultRepository + 'static,
{
    pub fn new(pipeline: ValidationPipeline, repository: Arc<R>, ttl: Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(36_500));
        Self {
            pipeline: Arc::new(pipeline),
            repository,
            ttl,
        }
    }

    pub fn pipeline(&self) -> &ValidationPipeline {
        &self.pipeline
    }

    /// Validate an idea and persist the result under a fresh id.
    pub async fn submit(
        &self,
        request: ValidationRequest,
    ) -> Result<StoredValidation, ValidationServiceError> {
        let idea_text = request.idea_text.trim();
        if idea_text.is_empty() {
            return Err(ValidationError::EmptyIdea.into());
        }
        if idea_text.chars().count() > MAX_IDEA_LENGTH {
            return Err(ValidationError::IdeaTooLong {
                max: MAX_IDEA_LENGTH,
            }
            .into());
        }

        let result = self
            .pipeline
            .validate_with_research(idea_text, &request.signals)
            .await?;

        let created_at = Utc::now();
        let expires_at = created_at
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let record = StoredValidation {
            id: next_validation_id(),
            created_at,
            expires_at,
            result,
        };

        let stored = self.repository.insert(record)?;
        info!(
            validation_id = %stored.id,
            status = stored.result.status.label(),
            "validation stored"
        );
        Ok(stored)
    }

    /// Fetch a stored validation; expired records are reported as not found.
    pub fn get(&self, id: &ValidationId) -> Result<StoredValidation, ValidationServiceError> {
        self.get_at(id, Utc::now())
    }

    pub fn get_at(
        &self,
        id: &ValidationId,
        now: DateTime<Utc>,
    ) -> Result<StoredValidation, ValidationServiceError> {
        let record = self
            .repository
            .fetch(id, now)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, ValidationServiceError> {
        Ok(self.repository.purge_expired(now)?)
    }
}

/// Error raised by the validation service.
#[derive(Debug, thiserror::Error)]
pub enum ValidationServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
