//! Business-idea viability screening.
//!
//! [`ValidationPipeline`] sequences the stages: the [`TextClassifier`] derives a
//! [`BusinessDna`], the saturation registry and market lookup attach competitive and
//! market intelligence, the weighting engine picks the rubric, the scoring engine
//! produces base scores plus an adjustment ledger, and the decision engine turns the
//! final scores into GO / REVIEW / NO-GO. Data only flows forward.

pub mod batch;
pub mod classifier;
pub mod competitive;
pub mod decision;
pub mod domain;
pub mod market;
pub mod pipeline;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod simulation;
mod text;
pub mod weighting;

#[cfg(test)]
mod tests;

pub use batch::{screen_batch, BatchIdea, BatchImportError, BatchImporter, BatchOutcome};
pub use classifier::{Taxonomy, TextClassifier, MINIMUM_CONFIDENCE};
pub use competitive::{MarketFingerprint, SaturationRegistry};
pub use decision::{Decision, DecisionConfig, DecisionContext, DecisionEngine, RedFlag, Thresholds};
pub use domain::{
    Adjustment, AdjustmentKind, AttributeBag, BusinessDna, BusinessModel,
    CompetitiveIntelligence, ComputedScores, CustomerType, Dimension, Industry, IntelSource,
    Intensity, Level, MarketIntelligence, NetworkEffects, RawSignals, Scale, ScoreKey, Stage,
    ValidationResult, ValidationStatus,
};
pub use market::{
    BenchmarkRegistry, IndustryBenchmark, MarketIntelLookup, MarketResearchProvider,
    ResearchError,
};
pub use pipeline::{ValidationError, ValidationPipeline};
pub use repository::{RepositoryError, ResultRepository, StoredValidation, ValidationId};
pub use router::validation_router;
pub use scoring::{
    replay, Ratio, RealityCheck, SaturationPenaltyMode, ScoringConfig, ScoringContext,
    ScoringEngine, ScoringOutcome, UnitEconomics, REALITY_CHECKS,
};
pub use service::{ValidationRequest, ValidationService, ValidationServiceError, MAX_IDEA_LENGTH};
pub use simulation::{EconomicsOutlook, EconomicsSimulator};
pub use weighting::{IndustryWeights, WeightProfile, WeightingEngine};
