use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::workflows::viability::domain::Industry;

/// Overall-score cutoffs on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub go: u8,
    pub review: u8,
}

/// Decision rubric: per-industry cutoffs and the score bands used for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionConfig {
    pub default_thresholds: Thresholds,
    pub industry_thresholds: BTreeMap<Industry, Thresholds>,
    /// Saturation above which an idea is rejected regardless of score.
    pub saturation_gate: f64,
    /// Dimensions below this are named in REVIEW reasoning.
    pub weak_dimension: f64,
    /// Dimensions below this are reported as risks.
    pub risk_dimension: f64,
    pub highlight_dimension: f64,
}

impl DecisionConfig {
    pub fn thresholds_for(&self, industry: Industry) -> Thresholds {
        self.industry_thresholds
            .get(&industry)
            .copied()
            .unwrap_or(self.default_thresholds)
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        let regulated = Thresholds { go: 75, review: 60 };
        let platform = Thresholds { go: 70, review: 55 };
        Self {
            default_thresholds: Thresholds { go: 70, review: 55 },
            industry_thresholds: BTreeMap::from([
                (Industry::Fintech, regulated),
                (Industry::Healthtech, regulated),
                (Industry::Marketplace, platform),
                (Industry::Saas, platform),
            ]),
            saturation_gate: 0.8,
            weak_dimension: 6.0,
            risk_dimension: 4.0,
            highlight_dimension: 7.0,
        }
    }
}
