//! Seeded Monte Carlo spread for the unit-economics point estimates.
//!
//! CAC, price, and margin are perturbed independently around the supplied values and
//! the payback distribution is summarized by percentiles. Identical inputs and seed
//! give identical outlooks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::domain::{MarketIntelligence, RawSignals};
use super::scoring::UnitEconomics;

/// Healthy LTV/CAC for the probability estimate.
const HEALTHY_LTV_TO_CAC: f64 = 3.0;
const MINIMUM_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicsOutlook {
    pub runs: u32,
    pub seed: u64,
    pub payback_months_p10: f64,
    pub payback_months_p50: f64,
    pub payback_months_p90: f64,
    /// Share of runs with LTV/CAC at or above 3; absent when no LTV was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability_healthy_ltv_to_cac: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct EconomicsSimulator {
    runs: u32,
    seed: u64,
}

impl EconomicsSimulator {
    pub fn new(runs: u32, seed: u64) -> Self {
        Self { runs, seed }
    }

    /// `None` when CAC or price is unknown, or when there is nothing to sample.
    pub fn simulate(
        &self,
        unit_economics: &UnitEconomics,
        signals: &RawSignals,
        market: &MarketIntelligence,
    ) -> Option<EconomicsOutlook> {
        let cac = signals.cac_estimate.filter(|cac| *cac > 0.0)?;
        let price = unit_economics.price_point.filter(|price| *price > 0.0)?;
        if self.runs == 0 {
            return None;
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut paybacks = Vec::with_capacity(self.runs as usize);
        let mut healthy = 0u32;

        for _ in 0..self.runs {
            let sampled_cac = cac * rng.gen_range(0.7..1.5);
            let sampled_price = price * rng.gen_range(0.85..1.1);
            let sampled_margin =
                (market.typical_margins + rng.gen_range(-0.1..0.1)).clamp(MINIMUM_MARGIN, 1.0);
            paybacks.push(sampled_cac / (sampled_price * sampled_margin));

            if let Some(ltv) = signals.ltv_estimate {
                let sampled_ltv = ltv * rng.gen_range(0.7..1.2);
                if sampled_ltv / sampled_cac >= HEALTHY_LTV_TO_CAC {
                    healthy += 1;
                }
            }
        }

        paybacks.sort_by(f64::total_cmp);

        Some(EconomicsOutlook {
            runs: self.runs,
            seed: self.seed,
            payback_months_p10: round1(percentile(&paybacks, 0.10)),
            payback_months_p50: round1(percentile(&paybacks, 0.50)),
            payback_months_p90: round1(percentile(&paybacks, 0.90)),
            probability_healthy_ltv_to_cac: signals
                .ltv_estimate
                .map(|_| f64::from(healthy) / f64::from(self.runs)),
        })
    }
}

/// Nearest-rank percentile of an ascending, non-empty slice.
fn percentile(sorted: &[f64], quantile: f64) -> f64 {
    let rank = ((sorted.len() as f64) * quantile).ceil() as usize;
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
