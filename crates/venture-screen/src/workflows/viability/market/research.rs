use async_trait::async_trait;

use crate::workflows::viability::domain::{BusinessDna, MarketIntelligence};

/// External market-research collaborator.
///
/// Implementations must honour the same contract as the static benchmarks and must
/// be safe to skip: callers bound every call with a timeout and drop the future when
/// it elapses.
#[async_trait]
pub trait MarketResearchProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn research(
        &self,
        idea_text: &str,
        dna: &BusinessDna,
    ) -> Result<MarketIntelligence, ResearchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    #[error("research provider unavailable: {0}")]
    Unavailable(String),
    #[error("research provider returned no usable data")]
    Empty,
}
