use tracing::debug;

use super::domain::{
    BusinessDna, BusinessModel, CustomerType, Industry, Level, NetworkEffects, Scale, Stage,
};
use super::pipeline::ValidationError;
use super::text::{contains_any, contains_term, normalize, word_count};

/// Below this confidence the caller is asked for a more detailed description.
pub const MINIMUM_CONFIDENCE: f64 = 0.4;
const MAXIMUM_CONFIDENCE: f64 = 0.95;
/// A candidate must collect at least this much keyword weight to beat the axis default.
const MINIMUM_CANDIDATE_SCORE: f64 = 2.0;

pub type Keywords = &'static [(&'static str, f64)];

/// One candidate value on a taxonomy axis with its weighted keywords.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<T: 'static> {
    pub value: T,
    pub keywords: Keywords,
}

/// Ordered single-pass rule: the first entry with any matching phrase wins.
pub type PhraseRules<T> = &'static [(T, &'static [&'static str])];

/// Declarative keyword tables for every classification axis.
///
/// Candidate slices are declared in priority order: when two candidates collect the
/// same keyword weight, the one declared first wins.
#[derive(Debug, Clone, Copy)]
pub struct Taxonomy {
    pub industries: &'static [Candidate<Industry>],
    pub sub_industries: &'static [Candidate<&'static str>],
    pub business_models: &'static [Candidate<BusinessModel>],
    pub customer_types: &'static [Candidate<CustomerType>],
    pub stages: PhraseRules<Stage>,
    pub scales: PhraseRules<Scale>,
    pub capital_intensity: PhraseRules<Level>,
    pub regulatory_complexity: PhraseRules<Level>,
    pub network_effects: PhraseRules<NetworkEffects>,
    pub indicators: &'static [&'static str],
}

impl Taxonomy {
    pub const fn standard() -> Self {
        Self {
            industries: INDUSTRIES,
            sub_industries: SUB_INDUSTRIES,
            business_models: BUSINESS_MODELS,
            customer_types: CUSTOMER_TYPES,
            stages: STAGES,
            scales: SCALES,
            capital_intensity: CAPITAL_INTENSITY,
            regulatory_complexity: REGULATORY_COMPLEXITY,
            network_effects: NETWORK_EFFECTS,
            indicators: INDICATORS,
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Maps idea text onto a [`BusinessDna`].
#[derive(Debug, Clone, Default)]
pub struct TextClassifier {
    taxonomy: Taxonomy,
}

impl TextClassifier {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn classify(&self, text: &str) -> Result<BusinessDna, ValidationError> {
        let normalized = normalize(text);
        let taxonomy = &self.taxonomy;

        let industry = best_candidate(&normalized, taxonomy.industries);
        let sub_industry = best_candidate(&normalized, taxonomy.sub_industries);
        let business_model = best_candidate(&normalized, taxonomy.business_models);
        let customer_type = best_candidate(&normalized, taxonomy.customer_types);

        let confidence = confidence(
            &normalized,
            taxonomy.indicators,
            industry.is_some(),
            business_model.is_some(),
        );
        if confidence < MINIMUM_CONFIDENCE {
            debug!(confidence, "idea text too thin to classify");
            return Err(ValidationError::InsufficientSignal {
                confidence,
                minimum: MINIMUM_CONFIDENCE,
            });
        }

        let industry = industry.unwrap_or(Industry::Technology);
        let regulatory_complexity = if industry.is_regulated() {
            Level::High
        } else {
            first_rule(&normalized, taxonomy.regulatory_complexity).unwrap_or(Level::Low)
        };

        let dna = BusinessDna {
            industry,
            sub_industry: sub_industry.unwrap_or("general").to_string(),
            business_model: business_model.unwrap_or(BusinessModel::Services),
            customer_type: customer_type.unwrap_or(CustomerType::B2c),
            stage: first_rule(&normalized, taxonomy.stages).unwrap_or(Stage::Idea),
            scale: first_rule(&normalized, taxonomy.scales).unwrap_or(Scale::National),
            capital_intensity: first_rule(&normalized, taxonomy.capital_intensity)
                .unwrap_or(Level::Medium),
            regulatory_complexity,
            network_effects: first_rule(&normalized, taxonomy.network_effects)
                .unwrap_or(NetworkEffects::None),
            confidence,
        };

        debug!(
            industry = dna.industry.label(),
            sub_industry = %dna.sub_industry,
            model = ?dna.business_model,
            customer = ?dna.customer_type,
            confidence = dna.confidence,
            "classified idea"
        );
        Ok(dna)
    }
}

fn keyword_score(text: &str, keywords: Keywords) -> f64 {
    keywords
        .iter()
        .filter(|(keyword, _)| contains_term(text, keyword))
        .map(|(_, weight)| weight)
        .sum()
}

/// Highest-scoring candidate at or above the threshold; ties keep the earlier entry.
fn best_candidate<T: Copy>(text: &str, candidates: &[Candidate<T>]) -> Option<T> {
    let mut best: Option<(T, f64)> = None;
    for candidate in candidates {
        let score = keyword_score(text, candidate.keywords);
        if score < MINIMUM_CANDIDATE_SCORE {
            continue;
        }
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((candidate.value, score));
        }
    }
    best.map(|(value, _)| value)
}

fn first_rule<T: Copy>(text: &str, rules: &[(T, &[&str])]) -> Option<T> {
    rules
        .iter()
        .find(|(_, phrases)| contains_any(text, phrases))
        .map(|(value, _)| *value)
}

fn confidence(text: &str, indicators: &[&str], industry_hit: bool, model_hit: bool) -> f64 {
    let words = word_count(text);
    if words == 0 {
        return 0.0;
    }

    let length = (words as f64 / 25.0).min(1.0);
    let indicator_hits = indicators
        .iter()
        .filter(|indicator| contains_term(text, indicator))
        .count()
        .min(6);

    let mut confidence = 0.2 + 0.3 * length + 0.05 * indicator_hits as f64;
    if industry_hit {
        confidence += 0.15;
    }
    if model_hit {
        confidence += 0.05;
    }
    confidence.min(MAXIMUM_CONFIDENCE)
}

const INDUSTRIES: &[Candidate<Industry>] = &[
    Candidate {
        value: Industry::Fintech,
        keywords: &[
            ("fintech", 3.0),
            ("payment", 2.0),
            ("banking", 2.0),
            ("bank", 1.0),
            ("lending", 2.0),
            ("loan", 2.0),
            ("credit", 1.0),
            ("insurance", 2.0),
            ("investing", 2.0),
            ("investment", 2.0),
            ("crypto", 2.0),
            ("wallet", 2.0),
            ("budget", 1.0),
            ("accounting", 2.0),
            ("bookkeeping", 2.0),
            ("financial", 2.0),
            ("finance", 2.0),
        ],
    },
    Candidate {
        value: Industry::Healthtech,
        keywords: &[
            ("healthcare", 3.0),
            ("health", 2.0),
            ("medical", 3.0),
            ("patient", 3.0),
            ("clinic", 2.0),
            ("doctor", 2.0),
            ("telemedicine", 3.0),
            ("telehealth", 3.0),
            ("therapy", 2.0),
            ("hospital", 3.0),
            ("pharmacy", 2.0),
            ("wellness", 1.0),
            ("fitness", 1.0),
        ],
    },
    Candidate {
        value: Industry::Edtech,
        keywords: &[
            ("edtech", 3.0),
            ("education", 3.0),
            ("learning", 2.0),
            ("student", 2.0),
            ("teacher", 2.0),
            ("course", 2.0),
            ("tutor", 2.0),
            ("tutoring", 2.0),
            ("school", 2.0),
            ("classroom", 2.0),
        ],
    },
    Candidate {
        value: Industry::Marketplace,
        keywords: &[
            ("marketplace", 3.0),
            ("buyers and sellers", 3.0),
            ("two-sided", 3.0),
            ("connects", 1.0),
            ("freelancer", 2.0),
            ("gig", 1.0),
            ("peer-to-peer", 2.0),
            ("booking platform", 2.0),
        ],
    },
    Candidate {
        value: Industry::Ecommerce,
        keywords: &[
            ("ecommerce", 3.0),
            ("e-commerce", 3.0),
            ("online store", 3.0),
            ("direct-to-consumer", 3.0),
            ("d2c", 2.0),
            ("retail", 2.0),
            ("shopify", 2.0),
            ("subscription box", 2.0),
            ("shop", 1.0),
        ],
    },
    Candidate {
        value: Industry::Foodtech,
        keywords: &[
            ("food", 2.0),
            ("restaurant", 2.0),
            ("meal", 2.0),
            ("recipe", 2.0),
            ("grocery", 2.0),
            ("groceries", 2.0),
            ("kitchen", 1.0),
        ],
    },
    Candidate {
        value: Industry::Proptech,
        keywords: &[
            ("real estate", 3.0),
            ("property", 2.0),
            ("landlord", 2.0),
            ("tenant", 2.0),
            ("rental", 2.0),
            ("apartment", 2.0),
            ("home buyer", 2.0),
        ],
    },
    Candidate {
        value: Industry::Climatetech,
        keywords: &[
            ("climate", 3.0),
            ("carbon", 3.0),
            ("solar", 3.0),
            ("renewable", 3.0),
            ("emissions", 3.0),
            ("ev charging", 3.0),
            ("energy", 2.0),
            ("sustainability", 2.0),
            ("recycling", 2.0),
        ],
    },
    Candidate {
        value: Industry::Logistics,
        keywords: &[
            ("logistics", 3.0),
            ("freight", 3.0),
            ("supply chain", 3.0),
            ("last-mile", 3.0),
            ("last mile", 3.0),
            ("shipping", 2.0),
            ("warehouse", 2.0),
            ("fleet", 2.0),
            ("courier", 2.0),
            ("delivery", 1.0),
        ],
    },
    Candidate {
        value: Industry::Media,
        keywords: &[
            ("social network", 3.0),
            ("media", 2.0),
            ("creator", 2.0),
            ("podcast", 2.0),
            ("newsletter", 2.0),
            ("streaming", 2.0),
            ("music", 2.0),
            ("gaming", 2.0),
            ("game", 2.0),
            ("content", 1.0),
            ("video", 1.0),
        ],
    },
    Candidate {
        value: Industry::Saas,
        keywords: &[
            ("saas", 3.0),
            ("software", 2.0),
            ("project management", 2.0),
            ("crm", 2.0),
            ("platform", 1.0),
            ("tool", 1.0),
            ("dashboard", 1.0),
            ("automation", 1.0),
            ("automate", 1.0),
            ("api", 1.0),
            ("integration", 1.0),
            ("workflow", 1.0),
            ("analytics", 1.0),
            ("cloud", 1.0),
        ],
    },
];

const SUB_INDUSTRIES: &[Candidate<&str>] = &[
    Candidate {
        value: "payments",
        keywords: &[("payment", 2.0), ("checkout", 2.0), ("point of sale", 2.0)],
    },
    Candidate {
        value: "lending",
        keywords: &[("lending", 2.0), ("loan", 2.0), ("credit", 1.0)],
    },
    Candidate {
        value: "insurance",
        keywords: &[("insurance", 3.0)],
    },
    Candidate {
        value: "personal-finance",
        keywords: &[("personal finance", 3.0), ("budget", 2.0), ("savings", 2.0)],
    },
    Candidate {
        value: "accounting",
        keywords: &[("accounting", 2.0), ("bookkeeping", 2.0), ("invoicing", 2.0)],
    },
    Candidate {
        value: "telemedicine",
        keywords: &[("telemedicine", 3.0), ("telehealth", 3.0), ("virtual visit", 2.0)],
    },
    Candidate {
        value: "mental-health",
        keywords: &[("mental health", 3.0), ("therapy", 2.0), ("anxiety", 2.0)],
    },
    Candidate {
        value: "fitness",
        keywords: &[("fitness", 2.0), ("workout", 2.0), ("gym", 2.0)],
    },
    Candidate {
        value: "online-courses",
        keywords: &[("course", 2.0), ("online learning", 2.0)],
    },
    Candidate {
        value: "tutoring",
        keywords: &[("tutor", 2.0), ("tutoring", 2.0), ("homework", 2.0)],
    },
    Candidate {
        value: "project-management",
        keywords: &[
            ("project management", 3.0),
            ("task management", 2.0),
            ("kanban", 2.0),
        ],
    },
    Candidate {
        value: "crm",
        keywords: &[("crm", 3.0), ("sales pipeline", 2.0)],
    },
    Candidate {
        value: "marketing-automation",
        keywords: &[
            ("email marketing", 3.0),
            ("marketing automation", 3.0),
            ("newsletter", 1.0),
        ],
    },
    Candidate {
        value: "collaboration",
        keywords: &[
            ("video conferencing", 3.0),
            ("team communication", 2.0),
            ("chat", 1.0),
        ],
    },
    Candidate {
        value: "security",
        keywords: &[("cybersecurity", 3.0), ("password", 2.0), ("security", 1.0)],
    },
    Candidate {
        value: "food-delivery",
        keywords: &[
            ("food delivery", 3.0),
            ("meal delivery", 3.0),
            ("restaurant", 1.0),
        ],
    },
    Candidate {
        value: "meal-kits",
        keywords: &[("meal kit", 3.0), ("recipe", 1.0)],
    },
    Candidate {
        value: "real-estate",
        keywords: &[("real estate", 3.0), ("property", 2.0), ("rental", 1.0)],
    },
    Candidate {
        value: "energy",
        keywords: &[
            ("ev charging", 3.0),
            ("solar", 2.0),
            ("energy", 2.0),
            ("renewable", 2.0),
        ],
    },
    Candidate {
        value: "freight",
        keywords: &[
            ("freight", 3.0),
            ("shipping", 2.0),
            ("supply chain", 2.0),
            ("last-mile", 2.0),
        ],
    },
    Candidate {
        value: "creator-economy",
        keywords: &[("creator", 2.0), ("podcast", 2.0), ("influencer", 2.0)],
    },
    Candidate {
        value: "inventory",
        keywords: &[("inventory", 2.0), ("forecasting", 1.0), ("reorder", 1.0)],
    },
];

const BUSINESS_MODELS: &[Candidate<BusinessModel>] = &[
    Candidate {
        value: BusinessModel::Marketplace,
        keywords: &[
            ("marketplace", 3.0),
            ("take rate", 3.0),
            ("commission", 2.0),
            ("two-sided", 2.0),
            ("connects buyers", 2.0),
        ],
    },
    Candidate {
        value: BusinessModel::Subscription,
        keywords: &[
            ("subscription", 3.0),
            ("/month", 2.0),
            ("per month", 2.0),
            ("/mo", 2.0),
            ("monthly", 2.0),
            ("recurring", 2.0),
            ("membership", 2.0),
            ("/year", 1.0),
            ("annual", 1.0),
        ],
    },
    Candidate {
        value: BusinessModel::Saas,
        keywords: &[
            ("saas", 3.0),
            ("per seat", 3.0),
            ("license", 2.0),
            ("software", 1.0),
        ],
    },
    Candidate {
        value: BusinessModel::Freemium,
        keywords: &[
            ("freemium", 3.0),
            ("free tier", 2.0),
            ("premium features", 2.0),
        ],
    },
    Candidate {
        value: BusinessModel::Transactional,
        keywords: &[
            ("transaction fee", 3.0),
            ("per transaction", 3.0),
            ("origination fee", 3.0),
            ("pay per", 2.0),
            ("per order", 2.0),
            ("fee", 1.0),
        ],
    },
    Candidate {
        value: BusinessModel::Advertising,
        keywords: &[
            ("advertising", 3.0),
            ("ad-supported", 3.0),
            ("sponsorship", 2.0),
            ("ads", 2.0),
        ],
    },
    Candidate {
        value: BusinessModel::Hardware,
        keywords: &[
            ("hardware", 3.0),
            ("device", 2.0),
            ("sensor", 2.0),
            ("wearable", 2.0),
        ],
    },
];

const CUSTOMER_TYPES: &[Candidate<CustomerType>] = &[
    Candidate {
        value: CustomerType::Marketplace,
        keywords: &[
            ("marketplace", 3.0),
            ("buyers and sellers", 3.0),
            ("two-sided", 3.0),
            ("hosts and guests", 3.0),
            ("connects", 1.0),
        ],
    },
    Candidate {
        value: CustomerType::B2b2c,
        keywords: &[
            ("b2b2c", 3.0),
            ("white-label", 2.0),
            ("through employers", 2.0),
            ("through retailers", 2.0),
        ],
    },
    Candidate {
        value: CustomerType::B2b,
        keywords: &[
            ("b2b", 3.0),
            ("companies", 2.0),
            ("enterprise", 2.0),
            ("small business", 2.0),
            ("smb", 2.0),
            ("agencies", 2.0),
            ("employer", 2.0),
            ("business", 1.0),
            ("owner", 1.0),
            ("team", 1.0),
            ("clinic", 1.0),
        ],
    },
    Candidate {
        value: CustomerType::B2c,
        keywords: &[
            ("b2c", 3.0),
            ("consumer", 2.0),
            ("families", 2.0),
            ("parent", 2.0),
            ("personal", 2.0),
            ("individual", 1.0),
            ("people", 1.0),
            ("student", 1.0),
        ],
    },
];

const STAGES: PhraseRules<Stage> = &[
    (
        Stage::Growth,
        &["scaling", "series a", "growing revenue", "thousands of customers"],
    ),
    (
        Stage::EarlyRevenue,
        &["paying customers", "first customers", "pilot customers", "revenue"],
    ),
    (Stage::Mvp, &["mvp", "prototype", "beta", "pilot"]),
];

const SCALES: PhraseRules<Scale> = &[
    (Scale::Global, &["global", "worldwide", "international"]),
    (Scale::Local, &["local", "neighborhood", "city", "campus"]),
    (Scale::Regional, &["regional", "statewide", "county"]),
    (Scale::National, &["nationwide", "national"]),
];

const CAPITAL_INTENSITY: PhraseRules<Level> = &[
    (
        Level::High,
        &[
            "hardware",
            "manufacturing",
            "factory",
            "vehicle",
            "fleet",
            "biotech",
            "satellite",
            "warehouse",
            "infrastructure",
            "drug",
        ],
    ),
    (
        Level::Low,
        &[
            "app",
            "software",
            "saas",
            "newsletter",
            "consulting",
            "online",
            "platform",
            "tool",
        ],
    ),
];

const REGULATORY_COMPLEXITY: PhraseRules<Level> = &[
    (
        Level::High,
        &[
            "medical",
            "patient",
            "bank",
            "lending",
            "loan",
            "insurance",
            "securities",
            "pharmacy",
            "hipaa",
            "cannabis",
            "firearm",
            "crypto",
            "telemedicine",
        ],
    ),
    (
        Level::Medium,
        &[
            "payment",
            "privacy",
            "food",
            "alcohol",
            "education",
            "drone",
            "real estate",
        ],
    ),
];

const NETWORK_EFFECTS: PhraseRules<NetworkEffects> = &[
    (
        NetworkEffects::Strong,
        &[
            "marketplace",
            "social network",
            "network effect",
            "community",
            "two-sided",
            "peer-to-peer",
            "viral",
        ],
    ),
    (
        NetworkEffects::Weak,
        &["sharing", "share", "referral", "collaboration", "invite"],
    ),
];

const INDICATORS: &[&str] = &[
    "customer",
    "user",
    "business",
    "platform",
    "app",
    "tool",
    "service",
    "software",
    "subscription",
    "pricing",
    "price",
    "revenue",
    "market",
    "startup",
    "companies",
    "b2b",
    "b2c",
    "$",
    "/month",
    "per month",
    "help",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_resolve_to_the_first_declared_candidate() {
        const TIED: &[Candidate<&str>] = &[
            Candidate {
                value: "first",
                keywords: &[("alpha", 2.0)],
            },
            Candidate {
                value: "second",
                keywords: &[("beta", 2.0)],
            },
        ];
        assert_eq!(best_candidate("alpha beta", TIED), Some("first"));
        assert_eq!(best_candidate("beta", TIED), Some("second"));
    }

    #[test]
    fn candidates_below_threshold_fall_back_to_default() {
        let dna = TextClassifier::default()
            .classify(
                "A simple helpful tool for everyday people who want to plan their weekends \
                 and holidays better together",
            )
            .expect("enough signal");
        assert_eq!(dna.industry, Industry::Technology);
        assert_eq!(dna.sub_industry, "general");
        assert_eq!(dna.business_model, BusinessModel::Services);
    }

    #[test]
    fn empty_text_has_zero_confidence() {
        let err = TextClassifier::default()
            .classify("   ")
            .expect_err("empty text must be rejected");
        match err {
            ValidationError::InsufficientSignal { confidence, .. } => assert_eq!(confidence, 0.0),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn confidence_is_capped() {
        let text = "Subscription software platform for small business owners and companies \
                    that helps customers manage pricing, revenue, and market data with a \
                    simple app and tool, $49/month per month, serving b2b startups across \
                    the national market with a clear business model";
        let dna = TextClassifier::default().classify(text).expect("classifies");
        assert!(dna.confidence <= MAXIMUM_CONFIDENCE);
        assert!(dna.confidence >= 0.9);
    }

    #[test]
    fn regulated_industries_force_high_regulatory_complexity() {
        let dna = TextClassifier::default()
            .classify("A budgeting app with a shared wallet that helps young families track finance goals")
            .expect("classifies");
        assert_eq!(dna.industry, Industry::Fintech);
        assert_eq!(dna.regulatory_complexity, Level::High);
    }
}
