//! Market-size, growth, and margin benchmarks.
//!
//! [`MarketIntelLookup::lookup`] answers from a static per-industry table and never
//! fails. [`MarketIntelLookup::enrich`] is the seam for live research: any
//! [`MarketResearchProvider`] can be plugged in and the static table remains the
//! fallback when the provider errors or runs past its timeout.

mod research;

pub use research::{MarketResearchProvider, ResearchError};

use std::time::Duration;

use tracing::{debug, warn};

use super::domain::{BusinessDna, Industry, IntelSource, MarketIntelligence};

const BENCHMARK_CONFIDENCE: f64 = 0.8;
const GENERIC_CONFIDENCE: f64 = 0.3;

#[derive(Debug, Clone, Copy)]
pub struct IndustryBenchmark {
    pub industry: Industry,
    pub tam_usd: f64,
    pub growth_rate: f64,
    pub competition_level: f64,
    pub typical_margins: f64,
    pub customer_acquisition_difficulty: f64,
    pub key_trends: &'static [&'static str],
    pub regulatory_barriers: &'static [&'static str],
}

impl IndustryBenchmark {
    fn intelligence(&self, confidence: f64, source: IntelSource) -> MarketIntelligence {
        MarketIntelligence {
            tam_usd: self.tam_usd,
            growth_rate: self.growth_rate,
            competition_level: self.competition_level,
            key_trends: self.key_trends.iter().map(|t| t.to_string()).collect(),
            regulatory_barriers: self
                .regulatory_barriers
                .iter()
                .map(|b| b.to_string())
                .collect(),
            typical_margins: self.typical_margins,
            customer_acquisition_difficulty: self.customer_acquisition_difficulty,
            confidence,
            source,
        }
    }
}

/// Read-only benchmark table keyed by industry.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkRegistry {
    benchmarks: &'static [IndustryBenchmark],
    generic: IndustryBenchmark,
}

impl BenchmarkRegistry {
    pub const fn standard() -> Self {
        Self {
            benchmarks: BENCHMARKS,
            generic: GENERIC,
        }
    }

    pub fn benchmark(&self, industry: Industry) -> Option<&IndustryBenchmark> {
        self.benchmarks
            .iter()
            .find(|benchmark| benchmark.industry == industry)
    }
}

impl Default for BenchmarkRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarketIntelLookup {
    registry: BenchmarkRegistry,
}

impl MarketIntelLookup {
    pub fn new(registry: BenchmarkRegistry) -> Self {
        Self { registry }
    }

    /// Static answer for `dna`. The idea text is accepted so the static table and
    /// research providers share one call shape; the table itself is keyed on industry.
    pub fn lookup(&self, _idea_text: &str, dna: &BusinessDna) -> MarketIntelligence {
        match self.registry.benchmark(dna.industry) {
            Some(benchmark) => benchmark.intelligence(BENCHMARK_CONFIDENCE, IntelSource::Benchmark),
            None => {
                debug!(
                    industry = dna.industry.label(),
                    "no benchmark for industry; using generic market profile"
                );
                self.registry
                    .generic
                    .intelligence(GENERIC_CONFIDENCE, IntelSource::Generic)
            }
        }
    }

    /// Ask `provider` for enriched intelligence, bounded by `timeout`.
    ///
    /// The provider future is dropped when the timeout elapses. Errors and timeouts
    /// degrade to [`MarketIntelLookup::lookup`]; they never fail the request.
    pub async fn enrich(
        &self,
        idea_text: &str,
        dna: &BusinessDna,
        provider: Option<&dyn MarketResearchProvider>,
        timeout: Duration,
    ) -> MarketIntelligence {
        let Some(provider) = provider else {
            return self.lookup(idea_text, dna);
        };

        match tokio::time::timeout(timeout, provider.research(idea_text, dna)).await {
            Ok(Ok(intel)) => {
                let mut intel = intel.sanitized();
                intel.source = IntelSource::Research;
                debug!(provider = provider.name(), "market research enrichment applied");
                intel
            }
            Ok(Err(err)) => {
                warn!(
                    provider = provider.name(),
                    error = %err,
                    "market research failed; falling back to benchmarks"
                );
                self.lookup(idea_text, dna)
            }
            Err(_) => {
                warn!(
                    provider = provider.name(),
                    timeout_ms = timeout.as_millis() as u64,
                    "market research timed out; falling back to benchmarks"
                );
                self.lookup(idea_text, dna)
            }
        }
    }
}

const GENERIC: IndustryBenchmark = IndustryBenchmark {
    industry: Industry::Technology,
    tam_usd: 50e9,
    growth_rate: 0.10,
    competition_level: 6.0,
    typical_margins: 0.40,
    customer_acquisition_difficulty: 6.0,
    key_trends: &[],
    regulatory_barriers: &[],
};

const BENCHMARKS: &[IndustryBenchmark] = &[
    IndustryBenchmark {
        industry: Industry::Fintech,
        tam_usd: 310e9,
        growth_rate: 0.20,
        competition_level: 7.5,
        typical_margins: 0.55,
        customer_acquisition_difficulty: 7.5,
        key_trends: &["embedded finance", "real-time payments", "open banking APIs"],
        regulatory_barriers: &[
            "money transmitter licensing",
            "KYC/AML obligations",
            "PCI DSS compliance",
        ],
    },
    IndustryBenchmark {
        industry: Industry::Healthtech,
        tam_usd: 280e9,
        growth_rate: 0.18,
        competition_level: 6.5,
        typical_margins: 0.45,
        customer_acquisition_difficulty: 8.0,
        key_trends: &[
            "virtual care",
            "remote patient monitoring",
            "AI-assisted triage",
        ],
        regulatory_barriers: &[
            "HIPAA",
            "FDA clearance for clinical software",
            "payer reimbursement rules",
        ],
    },
    IndustryBenchmark {
        industry: Industry::Edtech,
        tam_usd: 140e9,
        growth_rate: 0.16,
        competition_level: 6.5,
        typical_margins: 0.40,
        customer_acquisition_difficulty: 6.5,
        key_trends: &["microcredentials", "AI tutoring", "corporate upskilling"],
        regulatory_barriers: &["student data privacy (FERPA/COPPA)"],
    },
    IndustryBenchmark {
        industry: Industry::Ecommerce,
        tam_usd: 900e9,
        growth_rate: 0.11,
        competition_level: 8.5,
        typical_margins: 0.30,
        customer_acquisition_difficulty: 7.5,
        key_trends: &[
            "social commerce",
            "same-day fulfilment",
            "subscription replenishment",
        ],
        regulatory_barriers: &["consumer protection and returns rules", "sales tax nexus"],
    },
    IndustryBenchmark {
        industry: Industry::Saas,
        tam_usd: 250e9,
        growth_rate: 0.13,
        competition_level: 7.0,
        typical_margins: 0.75,
        customer_acquisition_difficulty: 6.0,
        key_trends: &["vertical SaaS", "AI copilots", "usage-based pricing"],
        regulatory_barriers: &["data protection (GDPR/CCPA)"],
    },
    IndustryBenchmark {
        industry: Industry::Marketplace,
        tam_usd: 180e9,
        growth_rate: 0.14,
        competition_level: 7.5,
        typical_margins: 0.20,
        customer_acquisition_difficulty: 7.0,
        key_trends: &[
            "vertical marketplaces",
            "managed marketplaces",
            "embedded payments",
        ],
        regulatory_barriers: &["worker classification rules", "platform liability"],
    },
    IndustryBenchmark {
        industry: Industry::Proptech,
        tam_usd: 35e9,
        growth_rate: 0.12,
        competition_level: 6.0,
        typical_margins: 0.35,
        customer_acquisition_difficulty: 6.5,
        key_trends: &["rental automation", "smart building sensors", "digital closings"],
        regulatory_barriers: &["fair housing rules", "brokerage licensing"],
    },
    IndustryBenchmark {
        industry: Industry::Foodtech,
        tam_usd: 220e9,
        growth_rate: 0.10,
        competition_level: 8.0,
        typical_margins: 0.25,
        customer_acquisition_difficulty: 7.5,
        key_trends: &["ghost kitchens", "food waste reduction", "restaurant software"],
        regulatory_barriers: &["food safety permits", "labeling requirements"],
    },
    IndustryBenchmark {
        industry: Industry::Climatetech,
        tam_usd: 120e9,
        growth_rate: 0.22,
        competition_level: 5.0,
        typical_margins: 0.35,
        customer_acquisition_difficulty: 6.0,
        key_trends: &[
            "carbon accounting",
            "distributed energy",
            "electrified transport",
        ],
        regulatory_barriers: &["utility interconnection rules", "emissions reporting standards"],
    },
    IndustryBenchmark {
        industry: Industry::Media,
        tam_usd: 160e9,
        growth_rate: 0.08,
        competition_level: 8.0,
        typical_margins: 0.40,
        customer_acquisition_difficulty: 7.0,
        key_trends: &["creator monetization", "short-form video", "paid communities"],
        regulatory_barriers: &["copyright and licensing", "content moderation obligations"],
    },
    IndustryBenchmark {
        industry: Industry::Logistics,
        tam_usd: 200e9,
        growth_rate: 0.09,
        competition_level: 7.0,
        typical_margins: 0.20,
        customer_acquisition_difficulty: 6.5,
        key_trends: &["route optimization", "nearshoring", "warehouse robotics"],
        regulatory_barriers: &["carrier authority (DOT/FMCSA)", "customs compliance"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::viability::domain::{
        BusinessModel, CustomerType, Level, NetworkEffects, Scale, Stage,
    };
    use async_trait::async_trait;

    fn dna(industry: Industry) -> BusinessDna {
        BusinessDna {
            industry,
            sub_industry: "general".to_string(),
            business_model: BusinessModel::Subscription,
            customer_type: CustomerType::B2b,
            stage: Stage::Idea,
            scale: Scale::National,
            capital_intensity: Level::Low,
            regulatory_complexity: Level::Low,
            network_effects: NetworkEffects::None,
            confidence: 0.7,
        }
    }

    struct SlowProvider(Duration);

    #[async_trait]
    impl MarketResearchProvider for SlowProvider {
        fn name(&self) -> &str {
            "slow"
        }

        async fn research(
            &self,
            _idea_text: &str,
            _dna: &BusinessDna,
        ) -> Result<MarketIntelligence, ResearchError> {
            tokio::time::sleep(self.0).await;
            Ok(MarketIntelligence {
                tam_usd: 9e9,
                growth_rate: 0.2,
                competition_level: 4.0,
                key_trends: vec!["late answer".to_string()],
                regulatory_barriers: Vec::new(),
                typical_margins: 0.6,
                customer_acquisition_difficulty: 5.0,
                confidence: 0.9,
                source: IntelSource::Research,
            })
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl MarketResearchProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn research(
            &self,
            _idea_text: &str,
            _dna: &BusinessDna,
        ) -> Result<MarketIntelligence, ResearchError> {
            Err(ResearchError::Unavailable("upstream 503".to_string()))
        }
    }

    struct OverreachingProvider;

    #[async_trait]
    impl MarketResearchProvider for OverreachingProvider {
        fn name(&self) -> &str {
            "overreaching"
        }

        async fn research(
            &self,
            _idea_text: &str,
            _dna: &BusinessDna,
        ) -> Result<MarketIntelligence, ResearchError> {
            Ok(MarketIntelligence {
                tam_usd: 75e9,
                growth_rate: 0.3,
                competition_level: 14.0,
                key_trends: vec!["agentic workflows".to_string()],
                regulatory_barriers: Vec::new(),
                typical_margins: 1.4,
                customer_acquisition_difficulty: -2.0,
                confidence: 0.95,
                source: IntelSource::Benchmark,
            })
        }
    }

    #[test]
    fn known_industries_use_benchmark_confidence() {
        let intel = MarketIntelLookup::default().lookup("", &dna(Industry::Fintech));
        assert_eq!(intel.source, IntelSource::Benchmark);
        assert_eq!(intel.confidence, BENCHMARK_CONFIDENCE);
        assert!(!intel.regulatory_barriers.is_empty());
    }

    #[test]
    fn unknown_industry_falls_back_to_generic_profile() {
        let intel = MarketIntelLookup::default().lookup("", &dna(Industry::Technology));
        assert_eq!(intel.source, IntelSource::Generic);
        assert_eq!(intel.confidence, GENERIC_CONFIDENCE);
    }

    #[tokio::test]
    async fn slow_provider_answers_within_generous_timeout() {
        let provider = SlowProvider(Duration::from_millis(5));
        let intel = MarketIntelLookup::default()
            .enrich(
                "idea",
                &dna(Industry::Saas),
                Some(&provider),
                Duration::from_secs(5),
            )
            .await;
        assert_eq!(intel.source, IntelSource::Research);
    }

    #[tokio::test]
    async fn slow_provider_times_out_to_benchmarks() {
        let provider = SlowProvider(Duration::from_millis(500));
        let intel = MarketIntelLookup::default()
            .enrich(
                "idea",
                &dna(Industry::Saas),
                Some(&provider),
                Duration::from_millis(10),
            )
            .await;
        assert_eq!(intel.source, IntelSource::Benchmark);
    }

    #[tokio::test]
    async fn failing_provider_falls_back_to_benchmarks() {
        let intel = MarketIntelLookup::default()
            .enrich(
                "idea",
                &dna(Industry::Saas),
                Some(&FailingProvider),
                Duration::from_secs(1),
            )
            .await;
        assert_eq!(intel.source, IntelSource::Benchmark);
    }

    #[tokio::test]
    async fn provider_records_are_clamped_to_contract() {
        let intel = MarketIntelLookup::default()
            .enrich(
                "idea",
                &dna(Industry::Saas),
                Some(&OverreachingProvider),
                Duration::from_secs(1),
            )
            .await;
        assert_eq!(intel.source, IntelSource::Research);
        assert_eq!(intel.competition_level, 10.0);
        assert_eq!(intel.typical_margins, 1.0);
        assert_eq!(intel.customer_acquisition_difficulty, 0.0);
    }
}
