use tracing::debug;

use crate::workflows::viability::competitive::{
    CRM_TERMS, EMAIL_MARKETING_TERMS, PASSWORD_MANAGEMENT_TERMS, PROJECT_MANAGEMENT_TERMS,
    SOCIAL_MEDIA_MANAGEMENT_TERMS, VIDEO_CONFERENCING_TERMS,
};
use crate::workflows::viability::domain::{Dimension, ScoreKey};
use crate::workflows::viability::text::contains_any;

use super::ledger::ScoreLedger;

/// Phrases that signal a vertical or otherwise specialized positioning.
const DIFFERENTIATION_MARKERS: &[&str] = &[
    "for dentists",
    "for lawyers",
    "for contractors",
    "for restaurants",
    "for clinics",
    "vertical",
    "niche",
    "specialized",
    "specialised",
    "exclusively for",
    "only for",
    "hipaa",
    "on-premise",
    "self-hosted",
    "open-source",
];

const DIFFERENTIATION: ScoreKey = ScoreKey::Dimension(Dimension::Differentiation);
const ECONOMICS: ScoreKey = ScoreKey::Dimension(Dimension::Economics);
const DEMAND: ScoreKey = ScoreKey::Dimension(Dimension::DemandSignals);
const MARKET_QUALITY: ScoreKey = ScoreKey::Dimension(Dimension::MarketQuality);

/// Hard ceilings for an undifferentiated entrant in a category owned by incumbents.
#[derive(Debug, Clone, Copy)]
pub struct RealityCheck {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
    pub ceilings: &'static [(ScoreKey, f64)],
}

impl RealityCheck {
    fn matches(&self, normalized_text: &str) -> bool {
        contains_any(normalized_text, self.triggers)
            && !contains_any(normalized_text, DIFFERENTIATION_MARKERS)
    }
}

/// Evaluated in order; at most one check fires.
pub const REALITY_CHECKS: &[RealityCheck] = &[
    RealityCheck {
        name: "project-management",
        triggers: PROJECT_MANAGEMENT_TERMS,
        ceilings: &[
            (DIFFERENTIATION, 2.0),
            (ECONOMICS, 3.0),
            (DEMAND, 3.0),
            (MARKET_QUALITY, 3.0),
            (ScoreKey::Overall, 20.0),
        ],
    },
    RealityCheck {
        name: "crm",
        triggers: CRM_TERMS,
        ceilings: &[
            (DIFFERENTIATION, 2.5),
            (ECONOMICS, 3.0),
            (DEMAND, 3.5),
            (MARKET_QUALITY, 3.0),
            (ScoreKey::Overall, 25.0),
        ],
    },
    RealityCheck {
        name: "email-marketing",
        triggers: EMAIL_MARKETING_TERMS,
        ceilings: &[
            (DIFFERENTIATION, 2.5),
            (ECONOMICS, 3.0),
            (DEMAND, 3.5),
            (MARKET_QUALITY, 3.5),
            (ScoreKey::Overall, 25.0),
        ],
    },
    RealityCheck {
        name: "video-conferencing",
        triggers: VIDEO_CONFERENCING_TERMS,
        ceilings: &[
            (DIFFERENTIATION, 1.5),
            (ECONOMICS, 2.5),
            (DEMAND, 3.0),
            (MARKET_QUALITY, 2.5),
            (ScoreKey::Overall, 15.0),
        ],
    },
    RealityCheck {
        name: "password-management",
        triggers: PASSWORD_MANAGEMENT_TERMS,
        ceilings: &[
            (DIFFERENTIATION, 2.5),
            (ECONOMICS, 3.0),
            (DEMAND, 3.5),
            (MARKET_QUALITY, 3.0),
            (ScoreKey::Overall, 25.0),
        ],
    },
    RealityCheck {
        name: "social-media-management",
        triggers: SOCIAL_MEDIA_MANAGEMENT_TERMS,
        ceilings: &[
            (DIFFERENTIATION, 2.5),
            (ECONOMICS, 3.0),
            (DEMAND, 3.5),
            (MARKET_QUALITY, 3.5),
            (ScoreKey::Overall, 25.0),
        ],
    },
];

/// Apply the first matching reality check. Returns its name when one fired.
pub(crate) fn apply_reality_checks(
    ledger: &mut ScoreLedger,
    normalized_text: &str,
) -> Option<&'static str> {
    let check = REALITY_CHECKS
        .iter()
        .find(|check| check.matches(normalized_text))?;

    debug!(check = check.name, "reality check applied");
    for (key, ceiling) in check.ceilings {
        ledger.cap(
            *key,
            *ceiling,
            format!("undifferentiated {} entrant", check.name),
        );
    }
    Some(check.name)
}
