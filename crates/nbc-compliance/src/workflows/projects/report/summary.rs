use std::collections::{BTreeMap, HashMap};

use super::views::{
    PathCountEntry, ProjectReportSummary, ProvinceCountEntry, StatusCountEntry, TierCountEntry,
};
use crate::workflows::calculator::{CompliancePath, TierLevel};
use crate::workflows::projects::domain::{ProjectRecord, ProjectStatus};

const UNSPECIFIED_PROVINCE: &str = "unspecified";

/// Running tallies over a set of stored projects.
#[derive(Debug, Default)]
pub struct ProjectReport {
    pub status_counts: HashMap<ProjectStatus, usize>,
    pub tier_counts: HashMap<TierLevel, usize>,
    pub path_counts: HashMap<CompliancePath, usize>,
    pub province_counts: BTreeMap<String, usize>,
    pub projects: usize,
    pub points_sum: f64,
    pub without_hrv: usize,
}

impl ProjectReport {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ProjectRecord>) -> Self {
        let mut report = Self::default();
        for record in records {
            report.record(record);
        }
        report
    }

    pub fn record(&mut self, record: &ProjectRecord) {
        self.projects += 1;
        self.points_sum += record.total_points;
        *self.status_counts.entry(record.status).or_default() += 1;
        *self.tier_counts.entry(record.compliance.tier).or_default() += 1;
        if let Some(path) = record.compliance_path {
            *self.path_counts.entry(path).or_default() += 1;
        }

        let province = record
            .province()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(UNSPECIFIED_PROVINCE)
            .to_ascii_lowercase();
        *self.province_counts.entry(province).or_default() += 1;

        if record.selections.without_hrv() {
            self.without_hrv += 1;
        }
    }

    pub fn average_points(&self) -> f64 {
        if self.projects == 0 {
            return 0.0;
        }
        (self.points_sum / self.projects as f64 * 10.0).round() / 10.0
    }

    pub fn summary(&self) -> ProjectReportSummary {
        let by_status = ProjectStatus::ordered()
            .into_iter()
            .filter_map(|status| {
                self.status_counts
                    .get(&status)
                    .map(|count| StatusCountEntry {
                        status,
                        status_label: status.label(),
                        count: *count,
                    })
            })
            .collect();

        let by_tier = TierLevel::ordered()
            .into_iter()
            .filter_map(|tier| {
                self.tier_counts.get(&tier).map(|count| TierCountEntry {
                    tier,
                    tier_label: tier.label(),
                    count: *count,
                })
            })
            .collect();

        let by_path = CompliancePath::ordered()
            .into_iter()
            .filter_map(|path| {
                self.path_counts.get(&path).map(|count| PathCountEntry {
                    path,
                    path_label: path.label(),
                    count: *count,
                })
            })
            .collect();

        let by_province = self
            .province_counts
            .iter()
            .map(|(province, count)| ProvinceCountEntry {
                province: province.clone(),
                count: *count,
            })
            .collect();

        ProjectReportSummary {
            total_projects: self.projects,
            by_status,
            by_tier,
            by_path,
            by_province,
            average_points: self.average_points(),
            without_hrv: self.without_hrv,
        }
    }
}
