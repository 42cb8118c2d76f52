use serde::Serialize;

use super::tier::{ComplianceTier, TierLevel};

const PRESCRIPTIVE_TIER_2_COST: i64 = 13_550;
const PRESCRIPTIVE_BASE_COST: i64 = 6_888;
const PERFORMANCE_TIER_2_COST: i64 = 8_150;
const PERFORMANCE_BASE_COST: i64 = 1_718;

/// Flat illustrative costs; they do not depend on the selected upgrades.
pub fn calculate_prescriptive_cost(tier: &ComplianceTier) -> i64 {
    if tier.tier == TierLevel::Tier2 {
        PRESCRIPTIVE_TIER_2_COST
    } else {
        PRESCRIPTIVE_BASE_COST
    }
}

pub fn calculate_performance_cost(tier: &ComplianceTier) -> i64 {
    if tier.tier == TierLevel::Tier2 {
        PERFORMANCE_TIER_2_COST
    } else {
        PERFORMANCE_BASE_COST
    }
}

pub fn calculate_cost_savings(tier: &ComplianceTier) -> i64 {
    calculate_prescriptive_cost(tier) - calculate_performance_cost(tier)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostEstimate {
    pub prescriptive: i64,
    pub performance: i64,
    pub savings: i64,
}

impl CostEstimate {
    pub fn for_tier(tier: &ComplianceTier) -> Self {
        Self {
            prescriptive: calculate_prescriptive_cost(tier),
            performance: calculate_performance_cost(tier),
            savings: calculate_cost_savings(tier),
        }
    }
}
