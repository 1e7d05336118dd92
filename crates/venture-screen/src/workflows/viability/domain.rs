use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Top-level industry taxonomy produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Fintech,
    Healthtech,
    Edtech,
    Ecommerce,
    Saas,
    Marketplace,
    Proptech,
    Foodtech,
    Climatetech,
    Media,
    Logistics,
    Technology,
}

impl Industry {
    pub const fn label(self) -> &'static str {
        match self {
            Industry::Fintech => "fintech",
            Industry::Healthtech => "healthtech",
            Industry::Edtech => "edtech",
            Industry::Ecommerce => "ecommerce",
            Industry::Saas => "saas",
            Industry::Marketplace => "marketplace",
            Industry::Proptech => "proptech",
            Industry::Foodtech => "foodtech",
            Industry::Climatetech => "climatetech",
            Industry::Media => "media",
            Industry::Logistics => "logistics",
            Industry::Technology => "technology",
        }
    }

    /// Industries whose ideas carry licensing or patient/consumer-protection exposure.
    pub const fn is_regulated(self) -> bool {
        matches!(self, Industry::Fintech | Industry::Healthtech)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessModel {
    Subscription,
    Saas,
    Marketplace,
    Transactional,
    Advertising,
    Freemium,
    Hardware,
    Services,
}

impl BusinessModel {
    pub const fn is_recurring(self) -> bool {
        matches!(self, BusinessModel::Subscription | BusinessModel::Saas)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    B2b,
    B2c,
    B2b2c,
    Marketplace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idea,
    Mvp,
    EarlyRevenue,
    Growth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Local,
    Regional,
    National,
    Global,
}

/// Three-step rating used for capital intensity and regulatory complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkEffects {
    None,
    Weak,
    Strong,
}

/// Structured taxonomy inferred from the idea text. Read-only once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessDna {
    pub industry: Industry,
    pub sub_industry: String,
    pub business_model: BusinessModel,
    pub customer_type: CustomerType,
    pub stage: Stage,
    pub scale: Scale,
    pub capital_intensity: Level,
    pub regulatory_complexity: Level,
    pub network_effects: NetworkEffects,
    pub confidence: f64,
}

/// Competitive-structure rating shared by the saturation registry fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    None,
    Low,
    Medium,
    High,
    Strong,
}

impl From<Level> for Intensity {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => Intensity::Low,
            Level::Medium => Intensity::Medium,
            Level::High => Intensity::High,
        }
    }
}

impl From<NetworkEffects> for Intensity {
    fn from(effects: NetworkEffects) -> Self {
        match effects {
            NetworkEffects::None => Intensity::None,
            NetworkEffects::Weak => Intensity::Low,
            NetworkEffects::Strong => Intensity::Strong,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitiveIntelligence {
    pub market_category: String,
    /// Registry fingerprint that matched the idea text, when any did.
    pub fingerprint: Option<String>,
    pub incumbents: Vec<String>,
    pub market_saturation: f64,
    pub entry_difficulty: f64,
    pub switching_costs: Intensity,
    pub network_effects: Intensity,
    pub capital_requirements: Intensity,
    pub brand_importance: Intensity,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntelSource {
    Benchmark,
    Generic,
    Research,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketIntelligence {
    pub tam_usd: f64,
    pub growth_rate: f64,
    pub competition_level: f64,
    pub key_trends: Vec<String>,
    pub regulatory_barriers: Vec<String>,
    pub typical_margins: f64,
    pub customer_acquisition_difficulty: f64,
    pub confidence: f64,
    pub source: IntelSource,
}

impl MarketIntelligence {
    /// Clamp every field into its documented range so third-party records obey the
    /// same contract as the static benchmarks.
    pub fn sanitized(mut self) -> Self {
        self.tam_usd = finite_or(self.tam_usd, 0.0).max(0.0);
        self.growth_rate = finite_or(self.growth_rate, 0.0).clamp(-1.0, 5.0);
        self.competition_level = finite_or(self.competition_level, 5.0).clamp(0.0, 10.0);
        self.typical_margins = finite_or(self.typical_margins, 0.0).clamp(0.0, 1.0);
        self.customer_acquisition_difficulty =
            finite_or(self.customer_acquisition_difficulty, 5.0).clamp(0.0, 10.0);
        self.confidence = finite_or(self.confidence, 0.0).clamp(0.0, 1.0);
        self
    }
}

/// Scoring dimensions. The base rubric always carries the first ten; the remainder
/// only appear when the weighting profile for a business asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Problem,
    Underserved,
    Feasibility,
    Differentiation,
    DemandSignals,
    WillingnessToPay,
    MarketQuality,
    Gtm,
    Execution,
    Risk,
    Economics,
    NetworkEffects,
    SupplyDemandBalance,
    RegulatoryCompliance,
    ViralPotential,
}

impl Dimension {
    pub const fn label(self) -> &'static str {
        match self {
            Dimension::Problem => "problem",
            Dimension::Underserved => "underserved",
            Dimension::Feasibility => "feasibility",
            Dimension::Differentiation => "differentiation",
            Dimension::DemandSignals => "demand_signals",
            Dimension::WillingnessToPay => "willingness_to_pay",
            Dimension::MarketQuality => "market_quality",
            Dimension::Gtm => "gtm",
            Dimension::Execution => "execution",
            Dimension::Risk => "risk",
            Dimension::Economics => "economics",
            Dimension::NetworkEffects => "network_effects",
            Dimension::SupplyDemandBalance => "supply_demand_balance",
            Dimension::RegulatoryCompliance => "regulatory_compliance",
            Dimension::ViralPotential => "viral_potential",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Target of a score adjustment: a single dimension or the 0-100 aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKey {
    Dimension(Dimension),
    Overall,
}

impl ScoreKey {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreKey::Dimension(dimension) => dimension.label(),
            ScoreKey::Overall => "overall",
        }
    }
}

impl From<Dimension> for ScoreKey {
    fn from(dimension: Dimension) -> Self {
        ScoreKey::Dimension(dimension)
    }
}

impl Serialize for ScoreKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Per-dimension scores in [0, 10] plus the weighted aggregate in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedScores {
    pub dimensions: BTreeMap<Dimension, f64>,
    pub overall: u8,
}

impl ComputedScores {
    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.dimensions.get(&dimension).copied()
    }

    /// Score for a dimension, or zero when the profile does not carry it.
    pub fn value(&self, dimension: Dimension) -> f64 {
        self.get(dimension).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Value lowered to a ceiling.
    Cap,
    /// Value held at a minimum after a reduction.
    Floor,
    /// Proportional or subtractive reduction.
    Penalty,
    /// Value recomputed from additional inputs.
    Rescore,
}

/// Audit record for a single change applied after the base scores were computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub dimension: ScoreKey,
    pub kind: AdjustmentKind,
    pub reason: String,
    pub before: f64,
    pub after: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationStatus {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "REVIEW")]
    Review,
    #[serde(rename = "NO-GO")]
    NoGo,
}

impl ValidationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ValidationStatus::Go => "GO",
            ValidationStatus::Review => "REVIEW",
            ValidationStatus::NoGo => "NO-GO",
        }
    }
}

/// Caller-supplied signals. Numeric fields are clamped into range by
/// [`RawSignals::sanitized`]; missing fields fall back to the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSignals {
    pub unavoidable: f64,
    pub urgency: f64,
    pub underserved: f64,
    pub feasibility: f64,
    pub pain_gain_ratio: f64,
    pub whitespace: f64,
    pub competition_density: f64,
    pub willingness_to_pay: f64,
    pub price_point: Option<f64>,
    pub interviews: Option<f64>,
    pub interviews_positive_pct: Option<f64>,
    pub waitlist_conv_rate_pct: Option<f64>,
    pub lois: Option<f64>,
    pub preorders: Option<f64>,
    pub ltv_estimate: Option<f64>,
    pub cac_estimate: Option<f64>,
    pub channels_clarity: f64,
    pub team_experience: f64,
    pub capital_runway_months: f64,
    pub regulatory_risk: f64,
    pub platform_dependency_risk: f64,
    pub safety_risk: f64,
    pub tam_quality: f64,
    pub growth_quality: f64,
    pub prohibited_content: bool,
    pub attributes: AttributeBag,
}

const NEUTRAL: f64 = 5.0;

impl Default for RawSignals {
    fn default() -> Self {
        Self {
            unavoidable: NEUTRAL,
            urgency: NEUTRAL,
            underserved: NEUTRAL,
            feasibility: NEUTRAL,
            pain_gain_ratio: NEUTRAL,
            whitespace: NEUTRAL,
            competition_density: NEUTRAL,
            willingness_to_pay: NEUTRAL,
            price_point: None,
            interviews: None,
            interviews_positive_pct: None,
            waitlist_conv_rate_pct: None,
            lois: None,
            preorders: None,
            ltv_estimate: None,
            cac_estimate: None,
            channels_clarity: NEUTRAL,
            team_experience: NEUTRAL,
            capital_runway_months: 6.0,
            regulatory_risk: 3.0,
            platform_dependency_risk: 3.0,
            safety_risk: 2.0,
            tam_quality: NEUTRAL,
            growth_quality: NEUTRAL,
            prohibited_content: false,
            attributes: AttributeBag::default(),
        }
    }
}

impl RawSignals {
    /// Copy with every field clamped to its valid range. Non-finite values are
    /// replaced by the field default; optional fields that are non-finite are dropped.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let rating = |value: f64, default: f64| finite_or(value, default).clamp(0.0, 10.0);
        let optional = |value: Option<f64>, max: f64| {
            value
                .filter(|raw| raw.is_finite())
                .map(|raw| raw.clamp(0.0, max))
        };

        Self {
            unavoidable: rating(self.unavoidable, defaults.unavoidable),
            urgency: rating(self.urgency, defaults.urgency),
            underserved: rating(self.underserved, defaults.underserved),
            feasibility: rating(self.feasibility, defaults.feasibility),
            pain_gain_ratio: rating(self.pain_gain_ratio, defaults.pain_gain_ratio),
            whitespace: rating(self.whitespace, defaults.whitespace),
            competition_density: rating(self.competition_density, defaults.competition_density),
            willingness_to_pay: rating(self.willingness_to_pay, defaults.willingness_to_pay),
            price_point: optional(self.price_point, f64::MAX),
            interviews: optional(self.interviews, f64::MAX),
            interviews_positive_pct: optional(self.interviews_positive_pct, 100.0),
            waitlist_conv_rate_pct: optional(self.waitlist_conv_rate_pct, 100.0),
            lois: optional(self.lois, f64::MAX),
            preorders: optional(self.preorders, f64::MAX),
            ltv_estimate: optional(self.ltv_estimate, f64::MAX),
            cac_estimate: optional(self.cac_estimate, f64::MAX),
            channels_clarity: rating(self.channels_clarity, defaults.channels_clarity),
            team_experience: rating(self.team_experience, defaults.team_experience),
            capital_runway_months: finite_or(
                self.capital_runway_months,
                defaults.capital_runway_months,
            )
            .max(0.0),
            regulatory_risk: rating(self.regulatory_risk, defaults.regulatory_risk),
            platform_dependency_risk: rating(
                self.platform_dependency_risk,
                defaults.platform_dependency_risk,
            ),
            safety_risk: rating(self.safety_risk, defaults.safety_risk),
            tam_quality: rating(self.tam_quality, defaults.tam_quality),
            growth_quality: rating(self.growth_quality, defaults.growth_quality),
            prohibited_content: self.prohibited_content,
            attributes: self.attributes.sanitized(),
        }
    }
}

/// Free-form qualitative attributes (`Disruptive`, `Defensible`, `Growth`, ...)
/// rated 0-10. Unknown names are carried but never read by the rubric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeBag(pub BTreeMap<String, f64>);

impl AttributeBag {
    pub const DISRUPTIVE: &'static str = "Disruptive";
    pub const DEFENSIBLE: &'static str = "Defensible";
    pub const GROWTH: &'static str = "Growth";
    pub const DISCONTINUOUS: &'static str = "Discontinuous";
    pub const SOCIAL_NEED: &'static str = "SocialNeed";
    pub const ACHIEVEMENT: &'static str = "Achievement";
    pub const RECOGNITION: &'static str = "Recognition";

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.0.insert(name.to_string(), value);
        self
    }

    /// Rating for `name`, or the neutral midpoint when absent.
    pub fn rating(&self, name: &str) -> f64 {
        self.0.get(name).copied().unwrap_or(NEUTRAL)
    }

    fn sanitized(&self) -> Self {
        Self(
            self.0
                .iter()
                .map(|(name, value)| (name.clone(), finite_or(*value, NEUTRAL).clamp(0.0, 10.0)))
                .collect(),
        )
    }
}

/// Complete, auditable answer for one idea.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub reasoning: String,
    pub risks: Vec<String>,
    pub highlights: Vec<String>,
    pub red_flags: Vec<String>,
    pub scores: ComputedScores,
    /// Scores before any adjustment; replaying `adjustments` over these yields `scores`.
    pub base_scores: ComputedScores,
    pub adjustments: Vec<Adjustment>,
    pub weights: super::weighting::IndustryWeights,
    pub business_dna: BusinessDna,
    pub market_intelligence: MarketIntelligence,
    pub competitive_intelligence: CompetitiveIntelligence,
    pub unit_economics: super::scoring::UnitEconomics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economics_outlook: Option<super::simulation::EconomicsOutlook>,
}

pub(crate) fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_clamps_out_of_range_signals() {
        let signals = RawSignals {
            urgency: 14.0,
            feasibility: -3.0,
            interviews_positive_pct: Some(140.0),
            cac_estimate: Some(f64::NAN),
            capital_runway_months: f64::INFINITY,
            ..RawSignals::default()
        }
        .sanitized();

        assert_eq!(signals.urgency, 10.0);
        assert_eq!(signals.feasibility, 0.0);
        assert_eq!(signals.interviews_positive_pct, Some(100.0));
        assert_eq!(signals.cac_estimate, None);
        assert_eq!(signals.capital_runway_months, 6.0);
    }

    #[test]
    fn signals_deserialize_with_defaults_and_attribute_bag() {
        let signals: RawSignals = serde_json::from_str(
            r#"{"feasibility": 8, "interviews": 12, "attributes": {"Defensible": 9}}"#,
        )
        .expect("signals parse");

        assert_eq!(signals.feasibility, 8.0);
        assert_eq!(signals.interviews, Some(12.0));
        assert_eq!(signals.urgency, 5.0);
        assert_eq!(signals.attributes.rating(AttributeBag::DEFENSIBLE), 9.0);
        assert_eq!(signals.attributes.rating(AttributeBag::GROWTH), 5.0);
    }

    #[test]
    fn score_keys_serialize_as_labels() {
        let adjustment = Adjustment {
            dimension: ScoreKey::Overall,
            kind: AdjustmentKind::Cap,
            reason: "ceiling".to_string(),
            before: 40.0,
            after: 20.0,
        };
        let json = serde_json::to_value(&adjustment).expect("serializes");
        assert_eq!(json["dimension"], "overall");
        assert_eq!(json["kind"], "cap");
        assert_eq!(
            serde_json::to_value(ValidationStatus::NoGo).expect("serializes"),
            "NO-GO"
        );
    }
}
