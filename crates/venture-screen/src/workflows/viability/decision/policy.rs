use serde::Serialize;

use crate::workflows::viability::domain::{
    BusinessDna, ComputedScores, Dimension, Level, RawSignals, ValidationStatus,
};
use crate::workflows::viability::scoring::{Ratio, UnitEconomics};

use super::config::DecisionConfig;
use super::DecisionContext;

/// Condition that rejects an idea outright, whatever its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RedFlag {
    ProhibitedContent,
    Infeasible,
    NoRealProblem,
    RegulatoryNightmare,
    BrokenUnitEconomics,
    SafetyCritical,
    RunwayExhausted,
}

impl RedFlag {
    pub const fn label(self) -> &'static str {
        match self {
            RedFlag::ProhibitedContent => "prohibited-content",
            RedFlag::Infeasible => "infeasible",
            RedFlag::NoRealProblem => "no-real-problem",
            RedFlag::RegulatoryNightmare => "regulatory-nightmare",
            RedFlag::BrokenUnitEconomics => "broken-unit-economics",
            RedFlag::SafetyCritical => "safety-critical",
            RedFlag::RunwayExhausted => "runway-exhausted",
        }
    }
}

pub(crate) fn red_flags(
    scores: &ComputedScores,
    dna: &BusinessDna,
    signals: &RawSignals,
    unit_economics: &UnitEconomics,
) -> Vec<RedFlag> {
    let mut flags = Vec::new();

    if signals.prohibited_content {
        flags.push(RedFlag::ProhibitedContent);
    }
    if signals.feasibility < 2.0 {
        flags.push(RedFlag::Infeasible);
    }
    if scores.value(Dimension::Problem) < 3.0 && scores.value(Dimension::Underserved) < 3.0 {
        flags.push(RedFlag::NoRealProblem);
    }

    let regulated_context =
        dna.industry.is_regulated() || dna.regulatory_complexity == Level::High;
    if regulated_context && signals.regulatory_risk >= 8.0 && signals.team_experience <= 3.0 {
        flags.push(RedFlag::RegulatoryNightmare);
    }

    let broken_ltv = match unit_economics.ltv_to_cac {
        Some(Ratio::Undefined) => true,
        Some(Ratio::Defined(ratio)) => ratio < 1.0,
        None => false,
    };
    let broken_payback = unit_economics.payback_months == Some(Ratio::Undefined);
    if broken_ltv || broken_payback {
        flags.push(RedFlag::BrokenUnitEconomics);
    }

    if signals.safety_risk >= 9.0 {
        flags.push(RedFlag::SafetyCritical);
    }
    if signals.capital_runway_months < 3.0 && dna.capital_intensity == Level::High {
        flags.push(RedFlag::RunwayExhausted);
    }

    flags
}

/// Status plus the one-line reasoning behind it.
pub(crate) fn decide_status(
    context: &DecisionContext<'_>,
    config: &DecisionConfig,
    flags: &[RedFlag],
) -> (ValidationStatus, String) {
    if !flags.is_empty() {
        let labels: Vec<&str> = flags.iter().map(|flag| flag.label()).collect();
        return (
            ValidationStatus::NoGo,
            format!("red flags raised: {}", labels.join(", ")),
        );
    }

    let competitive = context.competitive;
    if competitive.market_saturation > config.saturation_gate {
        let incumbents = if competitive.incumbents.is_empty() {
            "no named incumbents".to_string()
        } else {
            format!("incumbents include {}", competitive.incumbents.join(", "))
        };
        return (
            ValidationStatus::NoGo,
            format!(
                "{} market is {:.0}% saturated with entry difficulty {:.1}/10; {incumbents}",
                competitive.market_category,
                competitive.market_saturation * 100.0,
                competitive.entry_difficulty
            ),
        );
    }

    let overall = context.scores.overall;
    let industry = context.dna.industry;
    let thresholds = config.thresholds_for(industry);

    if overall >= thresholds.go {
        (
            ValidationStatus::Go,
            format!(
                "overall {overall} meets the {} go threshold of {}",
                industry.label(),
                thresholds.go
            ),
        )
    } else if overall >= thresholds.review {
        let weak: Vec<String> = context
            .scores
            .dimensions
            .iter()
            .filter(|(_, score)| **score < config.weak_dimension)
            .map(|(dimension, score)| format!("{dimension} ({score:.1})"))
            .collect();
        let detail = if weak.is_empty() {
            "no individual dimension is weak".to_string()
        } else {
            format!("weak dimensions: {}", weak.join(", "))
        };
        (
            ValidationStatus::Review,
            format!(
                "overall {overall} is between the review ({}) and go ({}) thresholds; {detail}",
                thresholds.review, thresholds.go
            ),
        )
    } else {
        (
            ValidationStatus::NoGo,
            format!(
                "overall {overall} is below the {} review threshold of {}",
                industry.label(),
                thresholds.review
            ),
        )
    }
}
