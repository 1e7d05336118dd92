//! Multi-dimensional scoring with an auditable adjustment trail.
//!
//! Base scores come straight from the signals. Everything after that (saturation
//! penalties, market rescoring, economics deductions, reality checks) goes through a
//! [`ledger::ScoreLedger`] so the returned adjustments replay onto the base scores.

mod economics;
mod ledger;
mod overrides;
mod penalties;
mod rules;

pub use economics::{Ratio, UnitEconomics};
pub use ledger::replay;
pub use overrides::{RealityCheck, REALITY_CHECKS};

use tracing::debug;

use super::domain::{
    Adjustment, AdjustmentKind, BusinessDna, CompetitiveIntelligence, ComputedScores,
    MarketIntelligence, RawSignals, ScoreKey,
};
use super::text::normalize;
use super::weighting::IndustryWeights;

use ledger::{aggregate, ScoreLedger};
use rules::RuleInputs;

/// How competitive saturation is charged against the scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaturationPenaltyMode {
    /// Scale the affected dimensions before aggregation.
    #[default]
    PerDimension,
    /// Deduct once from the overall score after aggregation.
    Aggregate,
}

impl SaturationPenaltyMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "per_dimension" | "per-dimension" => Some(Self::PerDimension),
            "aggregate" => Some(Self::Aggregate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringConfig {
    pub saturation_penalty: SaturationPenaltyMode,
}

/// Everything the scorer reads. Nothing here is mutated.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub idea_text: &'a str,
    pub signals: &'a RawSignals,
    pub dna: &'a BusinessDna,
    pub market: &'a MarketIntelligence,
    pub weights: &'a IndustryWeights,
    pub competitive: &'a CompetitiveIntelligence,
    pub unit_economics: &'a UnitEconomics,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOutcome {
    pub base: ComputedScores,
    pub scores: ComputedScores,
    pub adjustments: Vec<Adjustment>,
    /// Name of the reality check that fired, if any.
    pub reality_check: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ScoringConfig {
        self.config
    }

    pub fn score(&self, context: &ScoringContext<'_>) -> ScoringOutcome {
        let normalized = normalize(context.idea_text);

        let dimensions = rules::base_scores(&RuleInputs {
            normalized_text: &normalized,
            signals: context.signals,
            dna: context.dna,
            market: context.market,
            weights: context.weights,
            unit_economics: context.unit_economics,
        });
        let base = ComputedScores {
            overall: aggregate(&dimensions, context.weights) as u8,
            dimensions,
        };

        let mut ledger = ScoreLedger::new(&base);

        if self.config.saturation_penalty == SaturationPenaltyMode::PerDimension {
            penalties::apply_saturation_factor(&mut ledger, context.competitive);
        }
        penalties::rescore_market_quality(&mut ledger, context.market, context.competitive);
        economics::apply_market_penalties(
            &mut ledger,
            &normalized,
            context.signals,
            context.market,
            context.competitive,
            context.unit_economics,
        );
        penalties::dampen_saturated(&mut ledger, context.competitive);

        let overall = aggregate(ledger.dimensions(), context.weights);
        ledger.set(
            ScoreKey::Overall,
            AdjustmentKind::Rescore,
            overall,
            "weighted aggregate of adjusted dimensions",
        );

        if self.config.saturation_penalty == SaturationPenaltyMode::Aggregate {
            penalties::apply_aggregate_penalty(&mut ledger, context.competitive);
        }

        let reality_check = overrides::apply_reality_checks(&mut ledger, &normalized);

        let (scores, adjustments) = ledger.into_parts();
        debug!(
            base_overall = base.overall,
            overall = scores.overall,
            adjustments = adjustments.len(),
            "scoring complete"
        );

        ScoringOutcome {
            base,
            scores,
            adjustments,
            reality_check,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penalty_mode_parses_config_values() {
        assert_eq!(
            SaturationPenaltyMode::parse("per_dimension"),
            Some(SaturationPenaltyMode::PerDimension)
        );
        assert_eq!(
            SaturationPenaltyMode::parse(" Aggregate "),
            Some(SaturationPenaltyMode::Aggregate)
        );
        assert_eq!(SaturationPenaltyMode::parse("both"), None);
        assert_eq!(
            SaturationPenaltyMode::default(),
            SaturationPenaltyMode::PerDimension
        );
    }
}
