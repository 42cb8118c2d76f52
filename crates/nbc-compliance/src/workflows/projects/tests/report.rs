use super::common::*;
use chrono::Utc;

use crate::workflows::calculator::{CompliancePath, TierLevel};
use crate::workflows::projects::domain::{ProjectDraft, ProjectId, ProjectRecord, ProjectStatus};
use crate::workflows::projects::report::{export_csv, ProjectReport};

fn record(id: &str, status: ProjectStatus, draft: ProjectDraft) -> ProjectRecord {
    ProjectRecord::new(
        ProjectId(id.to_string()),
        "builder-1".to_string(),
        status,
        draft,
        Utc::now(),
    )
}

#[test]
fn summary_groups_by_status_tier_path_and_province() {
    let complete = record("prj-1", ProjectStatus::Submitted, complete_draft());
    let partial = record("prj-2", ProjectStatus::Draft, partial_draft());
    let mut no_hrv_draft = complete_draft();
    no_hrv_draft.selections.has_hrv = Some("no_hrv".to_string());
    no_hrv_draft.selections.province = None;
    let no_hrv = record("prj-3", ProjectStatus::Draft, no_hrv_draft);

    let summary = ProjectReport::from_records([&complete, &partial, &no_hrv]).summary();

    assert_eq!(summary.total_projects, 3);
    assert_eq!(summary.without_hrv, 1);

    let statuses: Vec<(ProjectStatus, usize)> = summary
        .by_status
        .iter()
        .map(|entry| (entry.status, entry.count))
        .collect();
    assert_eq!(
        statuses,
        vec![(ProjectStatus::Draft, 2), (ProjectStatus::Submitted, 1)]
    );

    let tiers: Vec<(TierLevel, usize)> = summary
        .by_tier
        .iter()
        .map(|entry| (entry.tier, entry.count))
        .collect();
    assert_eq!(
        tiers,
        vec![
            (TierLevel::Tier1, 1),
            (TierLevel::Tier3, 1),
            (TierLevel::NotApplicable, 1)
        ]
    );

    let paths: Vec<(CompliancePath, usize)> = summary
        .by_path
        .iter()
        .map(|entry| (entry.path, entry.count))
        .collect();
    assert_eq!(
        paths,
        vec![
            (CompliancePath::Prescriptive, 1),
            (CompliancePath::TieredPrescriptive, 2)
        ]
    );

    let provinces: Vec<(&str, usize)> = summary
        .by_province
        .iter()
        .map(|entry| (entry.province.as_str(), entry.count))
        .collect();
    assert_eq!(
        provinces,
        vec![("alberta", 1), ("saskatchewan", 1), ("unspecified", 1)]
    );

    // (28.5 + 6.7 + 28.5) / 3
    assert_eq!(summary.average_points, 21.2);
}

#[test]
fn empty_report_has_zero_average() {
    let summary = ProjectReport::default().summary();
    assert_eq!(summary.total_projects, 0);
    assert_eq!(summary.average_points, 0.0);
    assert!(summary.by_tier.is_empty());
}

#[test]
fn csv_export_writes_header_and_rows() {
    let complete = record("prj-1", ProjectStatus::Submitted, complete_draft());
    let partial = record("prj-2", ProjectStatus::Draft, partial_draft());

    let csv = export_csv([&complete, &partial]).expect("csv renders");
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines,
        vec![
            "id,owner,status,path,province,building_type,total_points,tier,files",
            "prj-1,builder-1,submitted,9368,saskatchewan,multi-unit,28.5,Tier 3,1",
            "prj-2,builder-1,draft,9362,alberta,,6.7,Tier 1,0",
        ]
    );
}

#[test]
fn csv_export_without_rows_still_has_header() {
    let csv = export_csv(std::iter::empty::<&ProjectRecord>()).expect("csv renders");
    assert_eq!(
        csv.trim_end(),
        "id,owner,status,path,province,building_type,total_points,tier,files"
    );
}
