use serde::{Deserialize, Serialize};

use super::selections::Selections;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TierLevel {
    #[serde(rename = "Tier 1")]
    Tier1,
    #[serde(rename = "Tier 2")]
    Tier2,
    #[serde(rename = "Tier 3")]
    Tier3,
    #[serde(rename = "Tier 4")]
    Tier4,
    #[serde(rename = "Tier 5")]
    Tier5,
    #[serde(rename = "Not Applicable")]
    NotApplicable,
}

impl TierLevel {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Tier1,
            Self::Tier2,
            Self::Tier3,
            Self::Tier4,
            Self::Tier5,
            Self::NotApplicable,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tier1 => "Tier 1",
            Self::Tier2 => "Tier 2",
            Self::Tier3 => "Tier 3",
            Self::Tier4 => "Tier 4",
            Self::Tier5 => "Tier 5",
            Self::NotApplicable => "Not Applicable",
        }
    }
}

/// Badge style attached to a tier result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Success,
    Warning,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceTier {
    pub tier: TierLevel,
    pub status: ComplianceStatus,
    pub description: String,
}

impl ComplianceTier {
    fn new(tier: TierLevel, status: ComplianceStatus, description: &str) -> Self {
        Self {
            tier,
            status,
            description: description.to_string(),
        }
    }
}

/// Highest threshold first. Alberta and Saskatchewan share these values.
const TIER_THRESHOLDS: [(f64, TierLevel, &str); 4] = [
    (75.0, TierLevel::Tier5, "Tier 5: 75 or more points"),
    (40.0, TierLevel::Tier4, "Tier 4: 40 or more points"),
    (20.0, TierLevel::Tier3, "Tier 3: 20 or more points"),
    (10.0, TierLevel::Tier2, "Tier 2: 10 or more points"),
];

/// Map a point total to the highest tier whose threshold it meets.
///
/// A project without a heat-recovery ventilator cannot follow the tiered
/// prescriptive path, whatever its points.
pub fn classify_tier(total_points: f64, selections: &Selections) -> ComplianceTier {
    if selections.without_hrv() {
        return ComplianceTier::new(
            TierLevel::NotApplicable,
            ComplianceStatus::Destructive,
            "Prescriptive path requires HRV/ERV",
        );
    }

    if let Some((_, tier, description)) = TIER_THRESHOLDS
        .iter()
        .find(|(threshold, _, _)| total_points >= *threshold)
    {
        return ComplianceTier::new(*tier, ComplianceStatus::Success, description);
    }

    if total_points > 0.0 {
        ComplianceTier::new(
            TierLevel::Tier1,
            ComplianceStatus::Warning,
            "Tier 1: under 10 points",
        )
    } else {
        ComplianceTier::new(
            TierLevel::Tier1,
            ComplianceStatus::Warning,
            "Tier 1: baseline compliance, 0 points required",
        )
    }
}
