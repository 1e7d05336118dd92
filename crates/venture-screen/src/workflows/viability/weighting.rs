use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{BusinessDna, CustomerType, Dimension, Level, NetworkEffects};

/// Base rubric; the ten weights sum to 100.
const BASE_WEIGHTS: &[(Dimension, f64)] = &[
    (Dimension::Problem, 15.0),
    (Dimension::Underserved, 10.0),
    (Dimension::Feasibility, 10.0),
    (Dimension::Differentiation, 10.0),
    (Dimension::DemandSignals, 15.0),
    (Dimension::WillingnessToPay, 10.0),
    (Dimension::MarketQuality, 10.0),
    (Dimension::Gtm, 8.0),
    (Dimension::Execution, 7.0),
    (Dimension::Risk, 5.0),
];

/// Named override applied on top of the base rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightProfile {
    Base,
    Marketplace,
    Regulated,
    Recurring,
    NetworkDriven,
}

struct ProfileRule {
    profile: WeightProfile,
    applies: fn(&BusinessDna) -> bool,
    overrides: &'static [(Dimension, f64)],
}

fn is_marketplace(dna: &BusinessDna) -> bool {
    dna.customer_type == CustomerType::Marketplace
}

fn is_heavily_regulated(dna: &BusinessDna) -> bool {
    dna.regulatory_complexity == Level::High
}

fn is_recurring(dna: &BusinessDna) -> bool {
    dna.business_model.is_recurring()
}

fn has_strong_network_effects(dna: &BusinessDna) -> bool {
    dna.network_effects == NetworkEffects::Strong
}

/// Tested in order; the first matching rule is the only one applied.
const PROFILE_RULES: &[ProfileRule] = &[
    ProfileRule {
        profile: WeightProfile::Marketplace,
        applies: is_marketplace,
        overrides: &[
            (Dimension::Problem, 10.0),
            (Dimension::Gtm, 5.0),
            (Dimension::NetworkEffects, 10.0),
            (Dimension::SupplyDemandBalance, 8.0),
        ],
    },
    ProfileRule {
        profile: WeightProfile::Regulated,
        applies: is_heavily_regulated,
        overrides: &[
            (Dimension::Feasibility, 12.0),
            (Dimension::Risk, 10.0),
            (Dimension::RegulatoryCompliance, 10.0),
        ],
    },
    ProfileRule {
        profile: WeightProfile::Recurring,
        applies: is_recurring,
        overrides: &[
            (Dimension::WillingnessToPay, 8.0),
            (Dimension::Gtm, 10.0),
            (Dimension::Economics, 10.0),
        ],
    },
    ProfileRule {
        profile: WeightProfile::NetworkDriven,
        applies: has_strong_network_effects,
        overrides: &[
            (Dimension::NetworkEffects, 10.0),
            (Dimension::ViralPotential, 6.0),
        ],
    },
];

/// Sparse dimension weights for one business.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryWeights {
    pub profile: WeightProfile,
    pub weights: BTreeMap<Dimension, f64>,
}

impl IndustryWeights {
    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.weights.get(&dimension).copied()
    }

    pub fn contains(&self, dimension: Dimension) -> bool {
        self.weights.contains_key(&dimension)
    }

    pub fn dimensions(&self) -> impl Iterator<Item = Dimension> + '_ {
        self.weights.keys().copied()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeightingEngine;

impl WeightingEngine {
    pub fn weights(&self, dna: &BusinessDna) -> IndustryWeights {
        let mut weights: BTreeMap<Dimension, f64> = BASE_WEIGHTS.iter().copied().collect();

        let profile = match PROFILE_RULES.iter().find(|rule| (rule.applies)(dna)) {
            Some(rule) => {
                weights.extend(rule.overrides.iter().copied());
                rule.profile
            }
            None => WeightProfile::Base,
        };

        IndustryWeights { profile, weights }
    }
}
