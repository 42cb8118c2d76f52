use serde::Serialize;

use crate::workflows::calculator::{CompliancePath, TierLevel};
use crate::workflows::projects::domain::ProjectStatus;

#[derive(Debug, Clone, Serialize)]
pub struct StatusCountEntry {
    pub status: ProjectStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TierCountEntry {
    pub tier: TierLevel,
    pub tier_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathCountEntry {
    pub path: CompliancePath,
    pub path_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvinceCountEntry {
    pub province: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectReportSummary {
    pub total_projects: usize,
    pub by_status: Vec<StatusCountEntry>,
    pub by_tier: Vec<TierCountEntry>,
    pub by_path: Vec<PathCountEntry>,
    pub by_province: Vec<ProvinceCountEntry>,
    pub average_points: f64,
    pub without_hrv: usize,
}

/// One exported project row.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRow<'a> {
    pub id: &'a str,
    pub owner: &'a str,
    pub status: &'static str,
    pub path: &'a str,
    pub province: &'a str,
    pub building_type: &'a str,
    pub total_points: f64,
    pub tier: &'static str,
    pub files: usize,
}
