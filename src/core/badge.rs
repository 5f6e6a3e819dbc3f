use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeTier {
    Diamond,
    Gold,
    Silver,
    Bronze,
    NeedsImprovement,
}

impl BadgeTier {
    /// Scan order for classification, highest threshold first.
    pub const ALL: [BadgeTier; 5] = [
        BadgeTier::Diamond,
        BadgeTier::Gold,
        BadgeTier::Silver,
        BadgeTier::Bronze,
        BadgeTier::NeedsImprovement,
    ];

    pub fn min_months(self) -> f64 {
        match self {
            BadgeTier::Diamond => 24.0,
            BadgeTier::Gold => 12.0,
            BadgeTier::Silver => 6.0,
            BadgeTier::Bronze => 3.0,
            BadgeTier::NeedsImprovement => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BadgeTier::Diamond => "Diamond (24+ months)",
            BadgeTier::Gold => "Gold (12-23 months)",
            BadgeTier::Silver => "Silver (6-11 months)",
            BadgeTier::Bronze => "Bronze (3-5 months)",
            BadgeTier::NeedsImprovement => "Needs Improvement (<3 months)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BadgeTier::Diamond => {
                "Exceptional preparedness! You could survive 2+ years without income."
            }
            BadgeTier::Gold => "Strong position. You could survive 1-2 years without income.",
            BadgeTier::Silver => "Good preparation. Covers most short-term crises.",
            BadgeTier::Bronze => "Basic emergency coverage. Consider building more savings.",
            BadgeTier::NeedsImprovement => {
                "High risk. Immediate action recommended to build reserves."
            }
        }
    }
}

/// Picks the highest tier whose threshold does not exceed `months_survivable`.
pub fn classify(months_survivable: f64) -> BadgeTier {
    BadgeTier::ALL
        .into_iter()
        .find(|tier| months_survivable >= tier.min_months())
        .unwrap_or(BadgeTier::NeedsImprovement)
}
