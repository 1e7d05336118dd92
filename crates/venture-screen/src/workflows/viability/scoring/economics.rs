use serde::{Serialize, Serializer};

use crate::workflows::viability::domain::{
    AdjustmentKind, CompetitiveIntelligence, Dimension, MarketIntelligence, RawSignals,
};
use crate::workflows::viability::competitive::{
    CRM_TERMS, EMAIL_MARKETING_TERMS, FOOD_DELIVERY_TERMS, NOTE_TAKING_TERMS,
    PASSWORD_MANAGEMENT_TERMS, PROJECT_MANAGEMENT_TERMS, SOCIAL_MEDIA_MANAGEMENT_TERMS,
    VIDEO_CONFERENCING_TERMS,
};
use crate::workflows::viability::text::{contains_any, extract_price};

use super::ledger::ScoreLedger;

/// Result of a ratio whose denominator may be zero or negative. Serializes as a
/// bare number or the string `"undefined"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Defined(f64),
    /// The denominator was not positive; never serialized as infinity.
    Undefined,
}

impl Ratio {
    fn of(numerator: f64, denominator: f64) -> Self {
        if denominator > 0.0 && numerator.is_finite() {
            Ratio::Defined(numerator / denominator)
        } else {
            Ratio::Undefined
        }
    }

    pub fn defined(self) -> Option<f64> {
        match self {
            Ratio::Defined(value) => Some(value),
            Ratio::Undefined => None,
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ratio::Defined(value) => serializer.serialize_f64(*value),
            Ratio::Undefined => serializer.serialize_str("undefined"),
        }
    }
}

/// Derived unit economics. `None` means the inputs were not supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitEconomics {
    pub price_point: Option<f64>,
    pub monthly_contribution: Option<f64>,
    pub ltv_to_cac: Option<Ratio>,
    pub payback_months: Option<Ratio>,
}

impl UnitEconomics {
    /// Price comes from the signals, else from the first dollar amount in the text.
    pub fn derive(idea_text: &str, signals: &RawSignals, market: &MarketIntelligence) -> Self {
        let price_point = signals.price_point.or_else(|| extract_price(idea_text));
        let monthly_contribution = price_point.map(|price| price * market.typical_margins);

        let ltv_to_cac = match (signals.ltv_estimate, signals.cac_estimate) {
            (Some(ltv), Some(cac)) => Some(Ratio::of(ltv, cac)),
            _ => None,
        };
        let payback_months = match (signals.cac_estimate, monthly_contribution) {
            (Some(cac), Some(contribution)) => Some(Ratio::of(cac, contribution)),
            _ => None,
        };

        Self {
            price_point,
            monthly_contribution,
            ltv_to_cac,
            payback_months,
        }
    }

    /// Standalone economics score before market penalties.
    pub(crate) fn base_score(&self) -> f64 {
        match self.ltv_to_cac {
            Some(Ratio::Defined(ratio)) => (ratio * 2.5).clamp(0.0, 10.0),
            Some(Ratio::Undefined) => 3.0,
            None => 5.0,
        }
    }
}

/// Flat deductions for categories whose economics are dominated by incumbents.
/// Each category counts once however many of its phrases appear.
const SATURATED_CATEGORY_PENALTIES: &[(&str, &[&str], f64)] = &[
    ("project management", PROJECT_MANAGEMENT_TERMS, 3.0),
    ("crm", CRM_TERMS, 3.0),
    ("email marketing", EMAIL_MARKETING_TERMS, 2.5),
    ("video conferencing", VIDEO_CONFERENCING_TERMS, 3.0),
    ("password management", PASSWORD_MANAGEMENT_TERMS, 2.5),
    ("social media management", SOCIAL_MEDIA_MANAGEMENT_TERMS, 2.5),
    ("food delivery", FOOD_DELIVERY_TERMS, 3.0),
    ("note taking", NOTE_TAKING_TERMS, 2.0),
    ("slack integration", &["slack integration"], 1.0),
];

const PENALTY_FLOOR: f64 = 2.0;
const DENSE_MARKET_CAP: f64 = 3.0;
const LOW_PRICE_THRESHOLD: f64 = 35.0;
const LOW_PRICE_PENALTY: f64 = 1.5;
const HARD_ACQUISITION_THRESHOLD: f64 = 7.0;
const HARD_ACQUISITION_PENALTY: f64 = 1.5;

/// Market-saturation adjustments to the economics dimension.
pub(crate) fn apply_market_penalties(
    ledger: &mut ScoreLedger,
    normalized_text: &str,
    signals: &RawSignals,
    market: &MarketIntelligence,
    competitive: &CompetitiveIntelligence,
    unit_economics: &UnitEconomics,
) {
    let (matched, penalty) = SATURATED_CATEGORY_PENALTIES
        .iter()
        .filter(|(_, terms, _)| contains_any(normalized_text, terms))
        .fold((Vec::<&str>::new(), 0.0_f64), |(mut names, total), (name, _, penalty)| {
            names.push(*name);
            (names, total + penalty)
        });

    if penalty > 0.0 {
        let before = ledger.dimension(Dimension::Economics);
        let floor = PENALTY_FLOOR.min(before);
        let reduced = before - penalty;
        if reduced < floor {
            ledger.set(
                Dimension::Economics,
                AdjustmentKind::Floor,
                floor,
                format!(
                    "saturated category ({}) penalty {penalty:.1} held at floor {floor:.1}",
                    matched.join(", ")
                ),
            );
        } else {
            ledger.set(
                Dimension::Economics,
                AdjustmentKind::Penalty,
                reduced,
                format!("saturated category ({}) penalty {penalty:.1}", matched.join(", ")),
            );
        }
    }

    if signals.competition_density >= 8.0 {
        ledger.cap(
            Dimension::Economics,
            DENSE_MARKET_CAP,
            format!(
                "competition density {:.1} leaves little pricing power",
                signals.competition_density
            ),
        );
    }

    if let Some(price) = unit_economics.price_point {
        if price < LOW_PRICE_THRESHOLD {
            let after = ledger.dimension(Dimension::Economics) - LOW_PRICE_PENALTY;
            ledger.set(
                Dimension::Economics,
                AdjustmentKind::Penalty,
                after,
                format!("price ${price:.0} is below ${LOW_PRICE_THRESHOLD:.0}"),
            );
        }
    }

    if market.customer_acquisition_difficulty >= HARD_ACQUISITION_THRESHOLD {
        let after = ledger.dimension(Dimension::Economics) - HARD_ACQUISITION_PENALTY;
        ledger.set(
            Dimension::Economics,
            AdjustmentKind::Penalty,
            after,
            format!(
                "customer acquisition difficulty {:.1} in {}",
                market.customer_acquisition_difficulty, competitive.market_category
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::viability::domain::IntelSource;

    fn market(margins: f64) -> MarketIntelligence {
        MarketIntelligence {
            tam_usd: 1e9,
            growth_rate: 0.1,
            competition_level: 5.0,
            key_trends: Vec::new(),
            regulatory_barriers: Vec::new(),
            typical_margins: margins,
            customer_acquisition_difficulty: 5.0,
            confidence: 0.8,
            source: IntelSource::Benchmark,
        }
    }

    #[test]
    fn zero_cac_yields_undefined_ratio() {
        let signals = RawSignals {
            ltv_estimate: Some(1200.0),
            cac_estimate: Some(0.0),
            price_point: Some(40.0),
            ..RawSignals::default()
        };
        let economics = UnitEconomics::derive("", &signals, &market(0.5));
        assert_eq!(economics.ltv_to_cac, Some(Ratio::Undefined));
        assert_eq!(economics.payback_months, Some(Ratio::Defined(0.0)));
        assert_eq!(economics.base_score(), 3.0);
    }

    #[test]
    fn zero_margin_yields_undefined_payback() {
        let signals = RawSignals {
            cac_estimate: Some(300.0),
            ..RawSignals::default()
        };
        let economics = UnitEconomics::derive("only $25/month", &signals, &market(0.0));
        assert_eq!(economics.price_point, Some(25.0));
        assert_eq!(economics.payback_months, Some(Ratio::Undefined));
        assert_eq!(economics.ltv_to_cac, None);
        assert_eq!(economics.base_score(), 5.0);
    }

    #[test]
    fn payback_divides_cac_by_contribution() {
        let signals = RawSignals {
            cac_estimate: Some(300.0),
            ltv_estimate: Some(1500.0),
            price_point: Some(100.0),
            ..RawSignals::default()
        };
        let economics = UnitEconomics::derive("", &signals, &market(0.75));
        assert_eq!(economics.payback_months, Some(Ratio::Defined(4.0)));
        assert_eq!(economics.ltv_to_cac, Some(Ratio::Defined(5.0)));
        assert_eq!(economics.base_score(), 10.0);
    }

    #[test]
    fn undefined_ratio_serializes_as_label() {
        let json = serde_json::to_value(Ratio::Undefined).expect("serializes");
        assert_eq!(json, "undefined");
    }
}
