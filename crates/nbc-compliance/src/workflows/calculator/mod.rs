//! NBC 9.36 energy conservation scoring.
//!
//! Everything in this module is a pure function of a [`Selections`] record:
//! table lookups, the point total, tier classification, cost estimates, and
//! the list of form fields still pending for the chosen compliance pathway.

mod cost;
pub mod options;
mod pending;
mod points;
pub mod router;
pub mod selections;
mod tier;

pub use cost::{
    calculate_cost_savings, calculate_performance_cost, calculate_prescriptive_cost,
    CostEstimate,
};
pub use options::{Category, NbcOption, OptionTable, TableVariant, UpgradeCost, UPGRADE_COSTS};
pub use pending::{pending_items, PendingItem, PendingItems, DOCUMENTS_LABEL};
pub use points::{category_breakdown, points_for_key, resolve_points, total_points, CategoryPoints};
pub use router::calculator_router;
pub use selections::{CompliancePath, FieldValue, Selections};
pub use tier::{classify_tier, ComplianceStatus, ComplianceTier, TierLevel};

use serde::Serialize;

/// Scoring result for one set of selections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    pub breakdown: Vec<CategoryPoints>,
    pub total_points: f64,
    pub compliance: ComplianceTier,
    pub costs: CostEstimate,
}

impl Scorecard {
    pub fn evaluate(selections: &Selections) -> Self {
        let breakdown = category_breakdown(selections);
        let total_points = points::round_points(breakdown.iter().map(|entry| entry.points).sum());
        let compliance = classify_tier(total_points, selections);
        let costs = CostEstimate::for_tier(&compliance);

        Self {
            breakdown,
            total_points,
            compliance,
            costs,
        }
    }
}
