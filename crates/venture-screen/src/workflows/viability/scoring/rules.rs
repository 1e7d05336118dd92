use std::collections::BTreeMap;

use crate::workflows::viability::competitive::{
    CRM_TERMS, DATING_TERMS, EMAIL_MARKETING_TERMS, FOOD_DELIVERY_TERMS, NOTE_TAKING_TERMS,
    PASSWORD_MANAGEMENT_TERMS, PROJECT_MANAGEMENT_TERMS, RIDE_SHARING_TERMS,
    SOCIAL_MEDIA_MANAGEMENT_TERMS, VIDEO_CONFERENCING_TERMS,
};
use crate::workflows::viability::domain::{
    AttributeBag, BusinessDna, Dimension, MarketIntelligence, NetworkEffects, RawSignals,
};
use crate::workflows::viability::text::{contains_any, contains_term};
use crate::workflows::viability::weighting::IndustryWeights;

use super::economics::UnitEconomics;
use super::ledger::round2;

/// Largest single match is subtracted from differentiation.
const GENERIC_FEATURES: &[(&str, f64)] = &[
    ("kanban", 3.0),
    ("task tracking", 2.5),
    ("to-do", 2.5),
    ("todo", 2.5),
    ("board", 2.0),
    ("crm", 2.0),
    ("email automation", 2.0),
    ("scheduling posts", 2.0),
    ("slack integration", 1.5),
    ("calendar sync", 1.5),
    ("dashboard", 1.0),
    ("notifications", 1.0),
    ("templates", 1.0),
    ("chat", 1.0),
];

/// Multipliers on willingness-to-pay and go-to-market; the smallest match applies.
const ECONOMICS_REALITY: &[(&[&str], f64)] = &[
    (PROJECT_MANAGEMENT_TERMS, 0.6),
    (CRM_TERMS, 0.6),
    (EMAIL_MARKETING_TERMS, 0.65),
    (VIDEO_CONFERENCING_TERMS, 0.5),
    (PASSWORD_MANAGEMENT_TERMS, 0.6),
    (SOCIAL_MEDIA_MANAGEMENT_TERMS, 0.65),
    (FOOD_DELIVERY_TERMS, 0.55),
    (RIDE_SHARING_TERMS, 0.5),
    (DATING_TERMS, 0.6),
    (NOTE_TAKING_TERMS, 0.7),
];

const DIFFERENTIATION_FLOOR: f64 = 0.5;
const NO_DEMAND_EVIDENCE: f64 = 2.0;
const RUNWAY_TARGET_MONTHS: f64 = 18.0;

pub(crate) struct RuleInputs<'a> {
    pub normalized_text: &'a str,
    pub signals: &'a RawSignals,
    pub dna: &'a BusinessDna,
    pub market: &'a MarketIntelligence,
    pub weights: &'a IndustryWeights,
    pub unit_economics: &'a UnitEconomics,
}

/// Per-dimension base scores. Dynamic dimensions are only produced when the
/// weighting profile carries them; economics is always produced.
pub(crate) fn base_scores(inputs: &RuleInputs<'_>) -> BTreeMap<Dimension, f64> {
    let signals = inputs.signals;
    let attributes = &signals.attributes;
    let reality = economics_reality(inputs.normalized_text);

    let mut scores = BTreeMap::new();
    let mut put = |dimension: Dimension, value: f64| {
        scores.insert(dimension, round2(value.clamp(0.0, 10.0)));
    };

    put(
        Dimension::Problem,
        signals.unavoidable * 0.35
            + signals.urgency * 0.25
            + signals.pain_gain_ratio * 0.25
            + signals.whitespace * 0.15,
    );
    put(
        Dimension::Underserved,
        signals.underserved * 0.7 + signals.whitespace * 0.3,
    );
    put(
        Dimension::Feasibility,
        signals.feasibility * 0.8 + signals.team_experience * 0.2,
    );
    put(Dimension::DemandSignals, demand_signals(signals));
    put(
        Dimension::Differentiation,
        differentiation(inputs.normalized_text, signals),
    );

    let price_signal = inputs
        .unit_economics
        .price_point
        .map_or(5.0, |price| (price / 20.0).clamp(0.0, 10.0));
    put(
        Dimension::WillingnessToPay,
        (signals.willingness_to_pay * 0.6 + price_signal * 0.4) * reality,
    );
    put(
        Dimension::MarketQuality,
        signals.tam_quality * 0.5 + signals.growth_quality * 0.5,
    );
    put(
        Dimension::Gtm,
        (signals.channels_clarity * 0.6
            + signals.team_experience * 0.2
            + (10.0 - inputs.market.customer_acquisition_difficulty) * 0.2)
            * reality,
    );
    put(
        Dimension::Execution,
        signals.team_experience * 0.5
            + (signals.capital_runway_months / RUNWAY_TARGET_MONTHS).min(1.0) * 10.0 * 0.3
            + signals.feasibility * 0.2,
    );
    put(
        Dimension::Risk,
        10.0 - (signals.regulatory_risk * 0.4
            + signals.platform_dependency_risk * 0.3
            + signals.safety_risk * 0.3),
    );
    put(Dimension::Economics, inputs.unit_economics.base_score());

    let weights = inputs.weights;
    if weights.contains(Dimension::NetworkEffects) {
        let structural = match inputs.dna.network_effects {
            NetworkEffects::None => 2.0,
            NetworkEffects::Weak => 5.0,
            NetworkEffects::Strong => 8.0,
        };
        put(
            Dimension::NetworkEffects,
            structural * 0.7 + attributes.rating(AttributeBag::GROWTH) * 0.3,
        );
    }
    if weights.contains(Dimension::SupplyDemandBalance) {
        put(
            Dimension::SupplyDemandBalance,
            signals.channels_clarity * 0.5 + (10.0 - signals.competition_density) * 0.5,
        );
    }
    if weights.contains(Dimension::RegulatoryCompliance) {
        put(
            Dimension::RegulatoryCompliance,
            (10.0 - signals.regulatory_risk) * 0.6 + signals.team_experience * 0.4,
        );
    }
    if weights.contains(Dimension::ViralPotential) {
        put(
            Dimension::ViralPotential,
            attributes.rating(AttributeBag::GROWTH) * 0.4
                + attributes.rating(AttributeBag::SOCIAL_NEED) * 0.3
                + attributes.rating(AttributeBag::RECOGNITION) * 0.15
                + attributes.rating(AttributeBag::ACHIEVEMENT) * 0.15,
        );
    }

    scores
}

/// Blend of the supplied evidence, renormalized over what was supplied.
fn demand_signals(signals: &RawSignals) -> f64 {
    let parts = [
        signals
            .interviews
            .map(|n| ((n / 15.0).min(1.0) * 10.0, 0.25)),
        signals.interviews_positive_pct.map(|pct| (pct / 10.0, 0.20)),
        signals
            .waitlist_conv_rate_pct
            .map(|pct| ((pct / 20.0).min(1.0) * 10.0, 0.25)),
        signals.lois.map(|n| ((n / 5.0).min(1.0) * 10.0, 0.15)),
        signals.preorders.map(|n| ((n / 10.0).min(1.0) * 10.0, 0.15)),
    ];

    let (sum, weight) = parts
        .iter()
        .flatten()
        .fold((0.0, 0.0), |(sum, total), (value, weight)| {
            (sum + value * weight, total + weight)
        });

    if weight > 0.0 {
        sum / weight
    } else {
        NO_DEMAND_EVIDENCE
    }
}

fn differentiation(normalized_text: &str, signals: &RawSignals) -> f64 {
    let attributes = &signals.attributes;
    let novelty = (attributes.rating(AttributeBag::DISRUPTIVE)
        + attributes.rating(AttributeBag::DEFENSIBLE)
        + attributes.rating(AttributeBag::DISCONTINUOUS))
        / 3.0;
    let raw = (10.0 - signals.competition_density) * 0.5 + novelty * 0.5;

    let generic_penalty = GENERIC_FEATURES
        .iter()
        .filter(|(term, _)| contains_term(normalized_text, term))
        .map(|(_, penalty)| *penalty)
        .fold(0.0, f64::max);

    (raw - generic_penalty).max(DIFFERENTIATION_FLOOR)
}

fn economics_reality(normalized_text: &str) -> f64 {
    ECONOMICS_REALITY
        .iter()
        .filter(|(terms, _)| contains_any(normalized_text, terms))
        .map(|(_, factor)| *factor)
        .fold(1.0, f64::min)
}
