use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::ValidationResult;

/// Opaque identifier handed back to callers after a submission.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationId(pub String);

impl fmt::Display for ValidationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Repository record for a completed validation.
#[derive(Debug, Clone, Serialize)]
pub struct StoredValidation {
    pub id: ValidationId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub result: ValidationResult,
}

impl StoredValidation {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Storage abstraction so the service can be exercised without a backing store.
///
/// Implementations must treat expired records as absent from `fetch`.
pub trait ResultRepository: Send + Sync {
    fn insert(&self, record: StoredValidation) -> Result<StoredValidation, RepositoryError>;
    fn fetch(
        &self,
        id: &ValidationId,
        now: DateTime<Utc>,
    ) -> Result<Option<StoredValidation>, RepositoryError>;
    /// Drop expired records, returning how many were removed.
    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
