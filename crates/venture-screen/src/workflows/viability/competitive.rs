use tracing::debug;

use super::domain::{BusinessDna, CompetitiveIntelligence, Intensity};
use super::text::{contains_any, normalize};

const DEFAULT_SATURATION: f64 = 0.5;
const DEFAULT_ENTRY_DIFFICULTY: f64 = 5.0;
const DEFAULT_CONFIDENCE: f64 = 0.6;
const FINGERPRINT_CONFIDENCE: f64 = 0.9;

/// Vocabulary of crowded categories, shared by the fingerprints below, the reality
/// checks, and the economics penalties.
pub(crate) const PROJECT_MANAGEMENT_TERMS: &[&str] = &[
    "project management",
    "task management",
    "kanban",
    "task tracker",
    "todo app",
    "to-do app",
];
pub(crate) const CRM_TERMS: &[&str] = &[
    "crm",
    "customer relationship management",
    "sales pipeline",
];
pub(crate) const EMAIL_MARKETING_TERMS: &[&str] = &[
    "email marketing",
    "newsletter tool",
    "email campaign",
];
pub(crate) const VIDEO_CONFERENCING_TERMS: &[&str] = &[
    "video conferencing",
    "video calls",
    "video meeting",
];
pub(crate) const PASSWORD_MANAGEMENT_TERMS: &[&str] = &["password manager", "password management"];
pub(crate) const SOCIAL_MEDIA_MANAGEMENT_TERMS: &[&str] = &[
    "social media management",
    "social media scheduler",
    "schedule posts",
];
pub(crate) const FOOD_DELIVERY_TERMS: &[&str] = &["food delivery", "meal delivery"];
pub(crate) const RIDE_SHARING_TERMS: &[&str] = &[
    "ride sharing",
    "ride-sharing",
    "ride-hailing",
    "rideshare",
];
pub(crate) const DATING_TERMS: &[&str] = &["dating app", "online dating"];
pub(crate) const NOTE_TAKING_TERMS: &[&str] = &["note taking", "note-taking", "notes app"];

/// Precomputed competitive profile of a known, crowded market.
#[derive(Debug, Clone, Copy)]
pub struct MarketFingerprint {
    pub name: &'static str,
    pub phrases: &'static [&'static str],
    pub incumbents: &'static [&'static str],
    pub market_saturation: f64,
    pub entry_difficulty: f64,
    pub switching_costs: Intensity,
    pub network_effects: Intensity,
    pub capital_requirements: Intensity,
    pub brand_importance: Intensity,
}

impl MarketFingerprint {
    fn intelligence(&self) -> CompetitiveIntelligence {
        CompetitiveIntelligence {
            market_category: self.name.to_string(),
            fingerprint: Some(self.name.to_string()),
            incumbents: self.incumbents.iter().map(|name| name.to_string()).collect(),
            market_saturation: self.market_saturation,
            entry_difficulty: self.entry_difficulty,
            switching_costs: self.switching_costs,
            network_effects: self.network_effects,
            capital_requirements: self.capital_requirements,
            brand_importance: self.brand_importance,
            confidence: FINGERPRINT_CONFIDENCE,
        }
    }
}

/// Ordered saturation registry.
///
/// Matching walks the fingerprints in declaration order and the first one with a
/// phrase present in the idea text wins, so broader or more saturated markets are
/// declared ahead of narrower ones that might share vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct SaturationRegistry {
    fingerprints: &'static [MarketFingerprint],
}

impl SaturationRegistry {
    pub const fn new(fingerprints: &'static [MarketFingerprint]) -> Self {
        Self { fingerprints }
    }

    pub const fn standard() -> Self {
        Self::new(FINGERPRINTS)
    }

    pub fn fingerprints(&self) -> &'static [MarketFingerprint] {
        self.fingerprints
    }

    pub fn lookup(&self, text: &str, dna: &BusinessDna) -> CompetitiveIntelligence {
        let normalized = normalize(text);
        match self
            .fingerprints
            .iter()
            .find(|fingerprint| contains_any(&normalized, fingerprint.phrases))
        {
            Some(fingerprint) => {
                debug!(
                    fingerprint = fingerprint.name,
                    saturation = fingerprint.market_saturation,
                    "matched saturated market fingerprint"
                );
                fingerprint.intelligence()
            }
            None => Self::fallback(dna),
        }
    }

    fn fallback(dna: &BusinessDna) -> CompetitiveIntelligence {
        CompetitiveIntelligence {
            market_category: dna.sub_industry.clone(),
            fingerprint: None,
            incumbents: Vec::new(),
            market_saturation: DEFAULT_SATURATION,
            entry_difficulty: DEFAULT_ENTRY_DIFFICULTY,
            switching_costs: Intensity::Medium,
            network_effects: dna.network_effects.into(),
            capital_requirements: dna.capital_intensity.into(),
            brand_importance: Intensity::Medium,
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

impl Default for SaturationRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

const FINGERPRINTS: &[MarketFingerprint] = &[
    MarketFingerprint {
        name: "project-management",
        phrases: PROJECT_MANAGEMENT_TERMS,
        incumbents: &[
            "Asana",
            "Monday.com",
            "Trello",
            "Jira",
            "ClickUp",
            "Notion",
            "Basecamp",
        ],
        market_saturation: 0.95,
        entry_difficulty: 8.5,
        switching_costs: Intensity::High,
        network_effects: Intensity::Medium,
        capital_requirements: Intensity::Medium,
        brand_importance: Intensity::High,
    },
    MarketFingerprint {
        name: "crm",
        phrases: CRM_TERMS,
        incumbents: &[
            "Salesforce",
            "HubSpot",
            "Pipedrive",
            "Zoho CRM",
            "Microsoft Dynamics",
        ],
        market_saturation: 0.92,
        entry_difficulty: 9.0,
        switching_costs: Intensity::High,
        network_effects: Intensity::Low,
        capital_requirements: Intensity::High,
        brand_importance: Intensity::High,
    },
    MarketFingerprint {
        name: "email-marketing",
        phrases: EMAIL_MARKETING_TERMS,
        incumbents: &["Mailchimp", "Constant Contact", "ConvertKit", "Klaviyo", "Brevo"],
        market_saturation: 0.90,
        entry_difficulty: 7.5,
        switching_costs: Intensity::Medium,
        network_effects: Intensity::None,
        capital_requirements: Intensity::Medium,
        brand_importance: Intensity::High,
    },
    MarketFingerprint {
        name: "video-conferencing",
        phrases: VIDEO_CONFERENCING_TERMS,
        incumbents: &["Zoom", "Google Meet", "Microsoft Teams", "Webex"],
        market_saturation: 0.95,
        entry_difficulty: 9.0,
        switching_costs: Intensity::Medium,
        network_effects: Intensity::Strong,
        capital_requirements: Intensity::High,
        brand_importance: Intensity::High,
    },
    MarketFingerprint {
        name: "password-management",
        phrases: PASSWORD_MANAGEMENT_TERMS,
        incumbents: &["1Password", "LastPass", "Bitwarden", "Dashlane"],
        market_saturation: 0.88,
        entry_difficulty: 8.0,
        switching_costs: Intensity::High,
        network_effects: Intensity::None,
        capital_requirements: Intensity::Medium,
        brand_importance: Intensity::Strong,
    },
    MarketFingerprint {
        name: "social-media-management",
        phrases: SOCIAL_MEDIA_MANAGEMENT_TERMS,
        incumbents: &["Hootsuite", "Buffer", "Sprout Social", "Later"],
        market_saturation: 0.87,
        entry_difficulty: 7.0,
        switching_costs: Intensity::Low,
        network_effects: Intensity::None,
        capital_requirements: Intensity::Low,
        brand_importance: Intensity::Medium,
    },
    MarketFingerprint {
        name: "food-delivery",
        phrases: FOOD_DELIVERY_TERMS,
        incumbents: &["DoorDash", "Uber Eats", "Grubhub", "Deliveroo"],
        market_saturation: 0.90,
        entry_difficulty: 9.0,
        switching_costs: Intensity::Low,
        network_effects: Intensity::Strong,
        capital_requirements: Intensity::High,
        brand_importance: Intensity::High,
    },
    MarketFingerprint {
        name: "ride-sharing",
        phrases: RIDE_SHARING_TERMS,
        incumbents: &["Uber", "Lyft", "Bolt"],
        market_saturation: 0.92,
        entry_difficulty: 9.5,
        switching_costs: Intensity::Low,
        network_effects: Intensity::Strong,
        capital_requirements: Intensity::High,
        brand_importance: Intensity::High,
    },
    MarketFingerprint {
        name: "dating",
        phrases: DATING_TERMS,
        incumbents: &["Tinder", "Bumble", "Hinge", "OkCupid"],
        market_saturation: 0.88,
        entry_difficulty: 8.5,
        switching_costs: Intensity::Low,
        network_effects: Intensity::Strong,
        capital_requirements: Intensity::Medium,
        brand_importance: Intensity::High,
    },
    MarketFingerprint {
        name: "note-taking",
        phrases: NOTE_TAKING_TERMS,
        incumbents: &["Notion", "Evernote", "OneNote", "Obsidian", "Bear"],
        market_saturation: 0.85,
        entry_difficulty: 6.0,
        switching_costs: Intensity::Medium,
        network_effects: Intensity::Low,
        capital_requirements: Intensity::Low,
        brand_importance: Intensity::Medium,
    },
    MarketFingerprint {
        name: "accounting",
        phrases: &["accounting software", "bookkeeping software", "invoicing"],
        incumbents: &["QuickBooks", "Xero", "FreshBooks", "Wave"],
        market_saturation: 0.82,
        entry_difficulty: 7.0,
        switching_costs: Intensity::High,
        network_effects: Intensity::Low,
        capital_requirements: Intensity::Medium,
        brand_importance: Intensity::High,
    },
    MarketFingerprint {
        name: "online-courses",
        phrases: &["online course", "course platform", "course marketplace"],
        incumbents: &["Udemy", "Coursera", "Teachable", "Skillshare", "Kajabi"],
        market_saturation: 0.78,
        entry_difficulty: 6.0,
        switching_costs: Intensity::Low,
        network_effects: Intensity::Medium,
        capital_requirements: Intensity::Low,
        brand_importance: Intensity::Medium,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::viability::domain::{
        BusinessModel, CustomerType, Industry, Level, NetworkEffects, Scale, Stage,
    };

    fn dna() -> BusinessDna {
        BusinessDna {
            industry: Industry::Saas,
            sub_industry: "inventory".to_string(),
            business_model: BusinessModel::Subscription,
            customer_type: CustomerType::B2b,
            stage: Stage::Idea,
            scale: Scale::National,
            capital_intensity: Level::Low,
            regulatory_complexity: Level::Low,
            network_effects: NetworkEffects::Weak,
            confidence: 0.7,
        }
    }

    #[test]
    fn first_declared_fingerprint_wins_on_overlap() {
        let registry = SaturationRegistry::standard();
        let intel = registry.lookup("A CRM with built-in kanban project management", &dna());
        assert_eq!(intel.fingerprint.as_deref(), Some("project-management"));
        assert_eq!(intel.incumbents.first().map(String::as_str), Some("Asana"));
    }

    #[test]
    fn unmatched_text_derives_defaults_from_dna() {
        let registry = SaturationRegistry::standard();
        let intel = registry.lookup("Reorder forecasting for bike repair shops", &dna());
        assert_eq!(intel.fingerprint, None);
        assert_eq!(intel.market_category, "inventory");
        assert_eq!(intel.market_saturation, DEFAULT_SATURATION);
        assert_eq!(intel.entry_difficulty, DEFAULT_ENTRY_DIFFICULTY);
        assert_eq!(intel.capital_requirements, Intensity::Low);
        assert_eq!(intel.network_effects, Intensity::Low);
        assert_eq!(intel.confidence, DEFAULT_CONFIDENCE);
        assert!(intel.incumbents.is_empty());
    }

    #[test]
    fn registry_values_stay_in_range() {
        for fingerprint in SaturationRegistry::standard().fingerprints() {
            assert!((0.0..=1.0).contains(&fingerprint.market_saturation));
            assert!((0.0..=10.0).contains(&fingerprint.entry_difficulty));
            assert!(!fingerprint.phrases.is_empty(), "{}", fingerprint.name);
        }
    }
}
