use std::collections::BTreeMap;

use crate::workflows::viability::domain::{
    Adjustment, AdjustmentKind, ComputedScores, Dimension, ScoreKey,
};
use crate::workflows::viability::weighting::IndustryWeights;

/// Working copy of the scores that records every change it accepts.
///
/// Values are rounded to two decimals on write, and a write that leaves the value
/// unchanged is dropped, so each recorded adjustment has `before != after` and
/// replaying the `after` values in order reproduces the final scores exactly.
#[derive(Debug, Clone)]
pub(crate) struct ScoreLedger {
    dimensions: BTreeMap<Dimension, f64>,
    overall: f64,
    adjustments: Vec<Adjustment>,
}

impl ScoreLedger {
    pub(crate) fn new(base: &ComputedScores) -> Self {
        Self {
            dimensions: base.dimensions.clone(),
            overall: f64::from(base.overall),
            adjustments: Vec::new(),
        }
    }

    pub(crate) fn value(&self, key: ScoreKey) -> f64 {
        match key {
            ScoreKey::Dimension(dimension) => self.dimension(dimension),
            ScoreKey::Overall => self.overall,
        }
    }

    pub(crate) fn dimension(&self, dimension: Dimension) -> f64 {
        self.dimensions.get(&dimension).copied().unwrap_or(0.0)
    }

    pub(crate) fn has(&self, key: ScoreKey) -> bool {
        match key {
            ScoreKey::Dimension(dimension) => self.dimensions.contains_key(&dimension),
            ScoreKey::Overall => true,
        }
    }

    pub(crate) fn overall(&self) -> f64 {
        self.overall
    }

    pub(crate) fn dimensions(&self) -> &BTreeMap<Dimension, f64> {
        &self.dimensions
    }

    /// Write `after` to `key`, recording the change. Missing dimensions are skipped.
    pub(crate) fn set(
        &mut self,
        key: impl Into<ScoreKey>,
        kind: AdjustmentKind,
        after: f64,
        reason: impl Into<String>,
    ) {
        let key = key.into();
        if !self.has(key) {
            return;
        }

        let before = self.value(key);
        let after = match key {
            ScoreKey::Dimension(_) => round2(after.clamp(0.0, 10.0)),
            ScoreKey::Overall => after.clamp(0.0, 100.0).round(),
        };
        if after == before {
            return;
        }

        match key {
            ScoreKey::Dimension(dimension) => {
                self.dimensions.insert(dimension, after);
            }
            ScoreKey::Overall => self.overall = after,
        }
        self.adjustments.push(Adjustment {
            dimension: key,
            kind,
            reason: reason.into(),
            before,
            after,
        });
    }

    /// Lower `key` to `ceiling` when it sits above it.
    pub(crate) fn cap(&mut self, key: impl Into<ScoreKey>, ceiling: f64, reason: impl Into<String>) {
        let key = key.into();
        if self.has(key) && self.value(key) > ceiling {
            self.set(key, AdjustmentKind::Cap, ceiling, reason);
        }
    }

    /// Multiply a dimension by `factor`.
    pub(crate) fn scale(&mut self, dimension: Dimension, factor: f64, reason: impl Into<String>) {
        let after = self.dimension(dimension) * factor;
        self.set(dimension, AdjustmentKind::Penalty, after, reason);
    }

    pub(crate) fn into_parts(self) -> (ComputedScores, Vec<Adjustment>) {
        let scores = ComputedScores {
            dimensions: self.dimensions,
            overall: self.overall.clamp(0.0, 100.0) as u8,
        };
        (scores, self.adjustments)
    }
}

/// Weighted 0-100 aggregate over the dimensions present in both maps.
pub(crate) fn aggregate(dimensions: &BTreeMap<Dimension, f64>, weights: &IndustryWeights) -> f64 {
    let (weighted, total) = weights
        .weights
        .iter()
        .filter_map(|(dimension, weight)| {
            dimensions
                .get(dimension)
                .map(|score| (score * weight, *weight))
        })
        .fold((0.0, 0.0), |(sum, total), (value, weight)| {
            (sum + value, total + weight)
        });

    if total <= 0.0 {
        return 0.0;
    }
    (10.0 * weighted / total).clamp(0.0, 100.0).round()
}

/// Rebuild final scores by applying `adjustments` in order to `base`.
pub fn replay(base: &ComputedScores, adjustments: &[Adjustment]) -> ComputedScores {
    let mut scores = base.clone();
    for adjustment in adjustments {
        match adjustment.dimension {
            ScoreKey::Dimension(dimension) => {
                scores.dimensions.insert(dimension, adjustment.after);
            }
            ScoreKey::Overall => scores.overall = adjustment.after.clamp(0.0, 100.0) as u8,
        }
    }
    scores
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
