mod config;
mod policy;

pub use config::{DecisionConfig, Thresholds};
pub use policy::RedFlag;

use serde::Serialize;

use super::domain::{
    BusinessDna, CompetitiveIntelligence, ComputedScores, Dimension, IntelSource,
    MarketIntelligence, RawSignals, ValidationStatus,
};
use super::scoring::{Ratio, UnitEconomics};
use policy::{decide_status, red_flags};

const HIGHLIGHT_DIMENSIONS: &[Dimension] = &[
    Dimension::Problem,
    Dimension::MarketQuality,
    Dimension::DemandSignals,
    Dimension::Differentiation,
    Dimension::Execution,
    Dimension::NetworkEffects,
    Dimension::ViralPotential,
];
const ELEVATED_RISK: f64 = 7.0;
const LOW_CONFIDENCE: f64 = 0.5;

/// Inputs the decision reads; final scores only, never the base scores.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub scores: &'a ComputedScores,
    pub dna: &'a BusinessDna,
    pub market: &'a MarketIntelligence,
    pub signals: &'a RawSignals,
    pub competitive: &'a CompetitiveIntelligence,
    pub unit_economics: &'a UnitEconomics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub status: ValidationStatus,
    pub reasoning: String,
    pub risks: Vec<String>,
    pub highlights: Vec<String>,
    pub red_flags: Vec<RedFlag>,
}

impl Decision {
    pub fn summary(&self) -> String {
        format!("{}: {}", self.status.label(), self.reasoning)
    }
}

/// Stateless decision policy; total and deterministic for a given config.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    config: DecisionConfig,
}

impl DecisionEngine {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    pub fn decide(&self, context: &DecisionContext<'_>) -> Decision {
        let flags = red_flags(
            context.scores,
            context.dna,
            context.signals,
            context.unit_economics,
        );
        let (status, reasoning) = decide_status(context, &self.config, &flags);

        Decision {
            status,
            reasoning,
            risks: self.risks(context),
            highlights: self.highlights(context.scores),
            red_flags: flags,
        }
    }

    fn highlights(&self, scores: &ComputedScores) -> Vec<String> {
        HIGHLIGHT_DIMENSIONS
            .iter()
            .filter_map(|dimension| {
                scores
                    .get(*dimension)
                    .filter(|score| *score >= self.config.highlight_dimension)
                    .map(|score| format!("strong {dimension} ({score:.1})"))
            })
            .collect()
    }

    fn risks(&self, context: &DecisionContext<'_>) -> Vec<String> {
        let mut risks: Vec<String> = context
            .scores
            .dimensions
            .iter()
            .filter(|(_, score)| **score < self.config.risk_dimension)
            .map(|(dimension, score)| format!("weak {dimension} ({score:.1})"))
            .collect();

        let signals = context.signals;
        for (label, value) in [
            ("regulatory risk", signals.regulatory_risk),
            ("platform dependency risk", signals.platform_dependency_risk),
            ("safety risk", signals.safety_risk),
        ] {
            if value >= ELEVATED_RISK {
                risks.push(format!("elevated {label} ({value:.1})"));
            }
        }

        if context.unit_economics.ltv_to_cac == Some(Ratio::Undefined) {
            risks.push("LTV/CAC undefined: customer acquisition cost is not positive".to_string());
        }
        if context.unit_economics.payback_months == Some(Ratio::Undefined) {
            risks.push("CAC payback undefined: no positive monthly contribution".to_string());
        }

        let competitive = context.competitive;
        if !competitive.incumbents.is_empty() {
            risks.push(format!(
                "established incumbents: {}",
                competitive.incumbents.join(", ")
            ));
        }
        if context.dna.industry.is_regulated() && !context.market.regulatory_barriers.is_empty() {
            risks.push(format!(
                "regulatory barriers: {}",
                context.market.regulatory_barriers.join(", ")
            ));
        }
        if context.market.source == IntelSource::Generic
            || context.market.confidence < LOW_CONFIDENCE
        {
            risks.push(format!(
                "market figures are generic (confidence {:.2})",
                context.market.confidence
            ));
        }

        risks
    }
}
