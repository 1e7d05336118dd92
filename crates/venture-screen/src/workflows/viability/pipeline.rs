use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::ScoringSettings;

use super::classifier::TextClassifier;
use super::competitive::SaturationRegistry;
use super::decision::{DecisionConfig, DecisionContext, DecisionEngine};
use super::domain::{BusinessDna, MarketIntelligence, RawSignals, ValidationResult};
use super::market::{MarketIntelLookup, MarketResearchProvider};
use super::scoring::{ScoringConfig, ScoringContext, ScoringEngine, UnitEconomics};
use super::simulation::EconomicsSimulator;
use super::weighting::WeightingEngine;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("idea text is too thin to classify (confidence {confidence:.2}, minimum {minimum:.2})")]
    InsufficientSignal { confidence: f64, minimum: f64 },
    #[error("idea text must not be empty")]
    EmptyIdea,
    #[error("idea text exceeds {max} characters")]
    IdeaTooLong { max: usize },
}

/// End-to-end screening of one idea: classify, look up intelligence, weight, score,
/// decide, and assemble the auditable result.
#[derive(Clone)]
pub struct ValidationPipeline {
    classifier: TextClassifier,
    saturation: SaturationRegistry,
    market: MarketIntelLookup,
    weighting: WeightingEngine,
    scoring: ScoringEngine,
    decision: DecisionEngine,
    simulator: EconomicsSimulator,
    research: Option<Arc<dyn MarketResearchProvider>>,
    research_timeout: Duration,
}

impl ValidationPipeline {
    pub fn new(settings: &ScoringSettings) -> Self {
        Self {
            classifier: TextClassifier::default(),
            saturation: SaturationRegistry::standard(),
            market: MarketIntelLookup::default(),
            weighting: WeightingEngine,
            scoring: ScoringEngine::new(ScoringConfig {
                saturation_penalty: settings.saturation_penalty,
            }),
            decision: DecisionEngine::default(),
            simulator: EconomicsSimulator::new(settings.simulation_runs, settings.simulation_seed),
            research: None,
            research_timeout: settings.research_timeout,
        }
    }

    pub fn with_research_provider(mut self, provider: Arc<dyn MarketResearchProvider>) -> Self {
        self.research = Some(provider);
        self
    }

    pub fn with_decision_config(mut self, config: DecisionConfig) -> Self {
        self.decision = DecisionEngine::new(config);
        self
    }

    /// Screen an idea against the static market tables.
    pub fn validate(
        &self,
        idea_text: &str,
        signals: &RawSignals,
    ) -> Result<ValidationResult, ValidationError> {
        let dna = self.classifier.classify(idea_text)?;
        let market = self.market.lookup(idea_text, &dna);
        Ok(self.evaluate(idea_text, signals, dna, market))
    }

    /// Same as [`ValidationPipeline::validate`], but asks the configured research
    /// provider for market data first. Provider failures fall back to the tables.
    pub async fn validate_with_research(
        &self,
        idea_text: &str,
        signals: &RawSignals,
    ) -> Result<ValidationResult, ValidationError> {
        let dna = self.classifier.classify(idea_text)?;
        let market = self
            .market
            .enrich(
                idea_text,
                &dna,
                self.research.as_deref(),
                self.research_timeout,
            )
            .await;
        Ok(self.evaluate(idea_text, signals, dna, market))
    }

    fn evaluate(
        &self,
        idea_text: &str,
        signals: &RawSignals,
        dna: BusinessDna,
        market: MarketIntelligence,
    ) -> ValidationResult {
        let signals = signals.sanitized();
        let competitive = self.saturation.lookup(idea_text, &dna);
        debug!(
            industry = dna.industry.label(),
            sub_industry = %dna.sub_industry,
            confidence = dna.confidence,
            market_category = %competitive.market_category,
            saturation = competitive.market_saturation,
            "idea classified"
        );

        let weights = self.weighting.weights(&dna);
        let unit_economics = UnitEconomics::derive(idea_text, &signals, &market);

        let outcome = self.scoring.score(&ScoringContext {
            idea_text,
            signals: &signals,
            dna: &dna,
            market: &market,
            weights: &weights,
            competitive: &competitive,
            unit_economics: &unit_economics,
        });

        let decision = self.decision.decide(&DecisionContext {
            scores: &outcome.scores,
            dna: &dna,
            market: &market,
            signals: &signals,
            competitive: &competitive,
            unit_economics: &unit_economics,
        });

        let economics_outlook = self.simulator.simulate(&unit_economics, &signals, &market);

        info!(
            status = decision.status.label(),
            overall = outcome.scores.overall,
            adjustments = outcome.adjustments.len(),
            red_flags = decision.red_flags.len(),
            "idea validated"
        );

        ValidationResult {
            status: decision.status,
            reasoning: decision.reasoning,
            risks: decision.risks,
            highlights: decision.highlights,
            red_flags: decision
                .red_flags
                .iter()
                .map(|flag| flag.label().to_string())
                .collect(),
            scores: outcome.scores,
            base_scores: outcome.base,
            adjustments: outcome.adjustments,
            weights,
            business_dna: dna,
            market_intelligence: market,
            competitive_intelligence: competitive,
            unit_economics,
            economics_outlook,
        }
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::new(&ScoringSettings::default())
    }
}
