use crate::workflows::viability::domain::{
    AdjustmentKind, CompetitiveIntelligence, Dimension, MarketIntelligence, ScoreKey,
};

use super::ledger::ScoreLedger;

const MINIMUM_FACTOR: f64 = 0.2;
/// Share of the full penalty applied to market quality and execution.
const SECONDARY_SHARE: f64 = 0.4;
const AGGREGATE_FLOOR: f64 = 10.0;

/// Multiplicative penalty factor in [0.2, 1.0] for a competitive profile.
pub(crate) fn saturation_factor(competitive: &CompetitiveIntelligence) -> f64 {
    let saturation = competitive.market_saturation;
    let saturation_component = if saturation > 0.8 {
        0.30 + (saturation - 0.8) * 1.5
    } else if saturation > 0.5 {
        (saturation - 0.5) * 0.5
    } else {
        0.0
    };

    let difficulty = competitive.entry_difficulty / 10.0;
    let difficulty_component = if difficulty > 0.7 {
        0.10 + (difficulty - 0.7) * 0.5
    } else if difficulty > 0.5 {
        (difficulty - 0.5) * 0.25
    } else {
        0.0
    };

    (1.0 - saturation_component - difficulty_component).max(MINIMUM_FACTOR)
}

/// Per-dimension saturation penalty.
pub(crate) fn apply_saturation_factor(
    ledger: &mut ScoreLedger,
    competitive: &CompetitiveIntelligence,
) {
    let factor = saturation_factor(competitive);
    if factor >= 1.0 {
        return;
    }

    let reason = format!(
        "{} saturation {:.0}% with entry difficulty {:.1} (factor {factor:.2})",
        competitive.market_category,
        competitive.market_saturation * 100.0,
        competitive.entry_difficulty
    );
    for dimension in [Dimension::DemandSignals, Dimension::Differentiation] {
        ledger.scale(dimension, factor, reason.clone());
    }

    let secondary = 1.0 - (1.0 - factor) * SECONDARY_SHARE;
    for dimension in [Dimension::MarketQuality, Dimension::Execution] {
        ledger.scale(dimension, secondary, reason.clone());
    }
}

/// Market quality implied by the market record alone.
pub(crate) fn market_lookup_quality(market: &MarketIntelligence) -> f64 {
    let tam_score = if market.tam_usd > 0.0 {
        ((market.tam_usd.log10() - 8.0) * 2.5).clamp(0.0, 10.0)
    } else {
        0.0
    };
    let growth_score = (market.growth_rate * 40.0).clamp(0.0, 10.0);
    (tam_score * 0.4 + growth_score * 0.35 + (10.0 - market.competition_level) * 0.25)
        .clamp(0.0, 10.0)
}

struct SaturationCap {
    saturation: f64,
    difficulty: Option<f64>,
    incumbents: Option<usize>,
    ceiling: f64,
}

/// Most severe first; only the first matching cap is applied.
const MARKET_QUALITY_CAPS: &[SaturationCap] = &[
    SaturationCap {
        saturation: 0.9,
        difficulty: Some(8.0),
        incumbents: None,
        ceiling: 2.0,
    },
    SaturationCap {
        saturation: 0.8,
        difficulty: Some(7.0),
        incumbents: None,
        ceiling: 3.0,
    },
    SaturationCap {
        saturation: 0.7,
        difficulty: None,
        incumbents: Some(5),
        ceiling: 4.0,
    },
];

/// Blend market quality with the market record, then cap it for saturated markets.
pub(crate) fn rescore_market_quality(
    ledger: &mut ScoreLedger,
    market: &MarketIntelligence,
    competitive: &CompetitiveIntelligence,
) {
    let lookup = market_lookup_quality(market);
    let blended = ledger.dimension(Dimension::MarketQuality) * 0.4 + lookup * 0.6;
    ledger.set(
        Dimension::MarketQuality,
        AdjustmentKind::Rescore,
        blended,
        format!("blended with market lookup {lookup:.1}"),
    );

    let incumbents = competitive.incumbents.len();
    let cap = MARKET_QUALITY_CAPS.iter().find(|cap| {
        competitive.market_saturation >= cap.saturation
            && cap
                .difficulty
                .map_or(true, |minimum| competitive.entry_difficulty >= minimum)
            && cap.incumbents.map_or(true, |minimum| incumbents >= minimum)
    });
    if let Some(cap) = cap {
        ledger.cap(
            Dimension::MarketQuality,
            cap.ceiling,
            format!(
                "saturated market: {:.0}% saturation, difficulty {:.1}, {incumbents} incumbents",
                competitive.market_saturation * 100.0,
                competitive.entry_difficulty
            ),
        );
    }
}

const DAMPENED_CEILINGS: &[(Dimension, f64)] = &[
    (Dimension::Problem, 6.0),
    (Dimension::Gtm, 3.0),
    (Dimension::WillingnessToPay, 3.0),
    (Dimension::Differentiation, 4.0),
];

/// Ceilings for markets above 80% saturation.
pub(crate) fn dampen_saturated(ledger: &mut ScoreLedger, competitive: &CompetitiveIntelligence) {
    if competitive.market_saturation <= 0.8 {
        return;
    }
    for (dimension, ceiling) in DAMPENED_CEILINGS {
        ledger.cap(
            *dimension,
            *ceiling,
            format!(
                "market saturation {:.0}% limits {dimension}",
                competitive.market_saturation * 100.0
            ),
        );
    }
}

/// Single deduction on the overall score. Never raises a score already below the floor.
pub(crate) fn apply_aggregate_penalty(
    ledger: &mut ScoreLedger,
    competitive: &CompetitiveIntelligence,
) {
    let penalty = competitive.market_saturation * 12.0
        + (competitive.entry_difficulty - 7.0).max(0.0) * 2.0;
    let before = ledger.overall();
    let after = (before - penalty).max(AGGREGATE_FLOOR.min(before));
    ledger.set(
        ScoreKey::Overall,
        AdjustmentKind::Penalty,
        after,
        format!(
            "aggregate saturation penalty {penalty:.1} for {}",
            competitive.market_category
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::viability::domain::{Intensity, IntelSource};

    fn competitive(saturation: f64, difficulty: f64) -> CompetitiveIntelligence {
        CompetitiveIntelligence {
            market_category: "test".to_string(),
            fingerprint: None,
            incumbents: Vec::new(),
            market_saturation: saturation,
            entry_difficulty: difficulty,
            switching_costs: Intensity::Medium,
            network_effects: Intensity::Low,
            capital_requirements: Intensity::Medium,
            brand_importance: Intensity::Medium,
            confidence: 0.6,
        }
    }

    #[test]
    fn factor_is_neutral_for_open_markets() {
        assert_eq!(saturation_factor(&competitive(0.5, 5.0)), 1.0);
    }

    #[test]
    fn factor_bottoms_out_for_crowded_markets() {
        assert_eq!(saturation_factor(&competitive(1.0, 10.0)), MINIMUM_FACTOR);
        let project_management = saturation_factor(&competitive(0.95, 8.5));
        assert!((project_management - 0.3).abs() < 1e-9);
    }

    #[test]
    fn lookup_quality_rewards_large_growing_markets() {
        let market = MarketIntelligence {
            tam_usd: 1e12,
            growth_rate: 0.25,
            competition_level: 0.0,
            key_trends: Vec::new(),
            regulatory_barriers: Vec::new(),
            typical_margins: 0.5,
            customer_acquisition_difficulty: 5.0,
            confidence: 0.8,
            source: IntelSource::Benchmark,
        };
        assert!((market_lookup_quality(&market) - 10.0).abs() < 1e-9);
        let empty = MarketIntelligence {
            tam_usd: 0.0,
            growth_rate: -0.2,
            competition_level: 10.0,
            ..market
        };
        assert_eq!(market_lookup_quality(&empty), 0.0);
    }
}
