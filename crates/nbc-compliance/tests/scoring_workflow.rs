//! End-to-end scoring behavior through the public calculator facade.

use nbc_compliance::workflows::calculator::{
    classify_tier, pending_items, resolve_points, Category, ComplianceStatus, Scorecard,
    Selections, TableVariant, TierLevel,
};
use nbc_compliance::workflows::files::UploadedFile;

fn saskatchewan_multi_unit() -> Selections {
    Selections {
        wall_rsi: Some("3.85".to_string()),
        below_grade_rsi: Some("3.09".to_string()),
        airtightness: Some("AL-3A".to_string()),
        has_hrv: Some("with_hrv".to_string()),
        province: Some("saskatchewan".to_string()),
        building_type: Some("multi-unit".to_string()),
        ..Selections::default()
    }
}

#[test]
fn multi_unit_scenario_totals_its_table_values() {
    let scorecard = Scorecard::evaluate(&saskatchewan_multi_unit());

    assert_eq!(scorecard.total_points, 16.9);
    assert_eq!(scorecard.compliance.tier, TierLevel::Tier2);
    assert_eq!(scorecard.compliance.status, ComplianceStatus::Success);
    assert_eq!(scorecard.costs.prescriptive, 13_550);
    assert_eq!(scorecard.costs.performance, 8_150);
}

#[test]
fn scoring_is_idempotent() {
    let selections = saskatchewan_multi_unit();
    assert_eq!(
        Scorecard::evaluate(&selections),
        Scorecard::evaluate(&selections)
    );
}

#[test]
fn tables_are_monotonic_in_insulation_order() {
    for category in [
        Category::WallRsi,
        Category::BelowGradeRsi,
        Category::WindowUValue,
        Category::Hrv,
    ] {
        for variant in [TableVariant::Standard, TableVariant::Zone7B] {
            let points: Vec<f64> = category
                .table()
                .options(variant)
                .iter()
                .map(|option| option.points)
                .collect();
            assert!(
                points.windows(2).all(|pair| pair[0] <= pair[1]),
                "{} is not monotonic: {points:?}",
                category.key()
            );
        }
    }
}

#[test]
fn threshold_boundaries_hold_for_both_provinces() {
    for province in ["alberta", "saskatchewan"] {
        let selections = Selections {
            province: Some(province.to_string()),
            ..Selections::default()
        };
        let cases = [
            (75.0, TierLevel::Tier5),
            (74.99, TierLevel::Tier4),
            (40.0, TierLevel::Tier4),
            (39.99, TierLevel::Tier3),
            (20.0, TierLevel::Tier3),
            (19.99, TierLevel::Tier2),
            (10.0, TierLevel::Tier2),
            (9.99, TierLevel::Tier1),
            (0.01, TierLevel::Tier1),
            (0.0, TierLevel::Tier1),
        ];
        for (points, expected) in cases {
            assert_eq!(
                classify_tier(points, &selections).tier,
                expected,
                "{points} points in {province}"
            );
        }
    }
}

#[test]
fn missing_hrv_is_never_applicable() {
    let mut selections = saskatchewan_multi_unit();
    selections.has_hrv = Some("no_hrv".to_string());
    selections.wall_rsi = Some("5.10".to_string());
    selections.airtightness = Some("AL-6A".to_string());

    let scorecard = Scorecard::evaluate(&selections);
    assert!(scorecard.total_points > 20.0);
    assert_eq!(scorecard.compliance.tier, TierLevel::NotApplicable);
    assert_eq!(scorecard.compliance.status, ComplianceStatus::Destructive);
}

#[test]
fn alberta_zone_7b_uses_its_own_table() {
    let zone_7b = Selections {
        province: Some("alberta".to_string()),
        climate_zone: Some("7B".to_string()),
        ..Selections::default()
    };
    let zone_7a = Selections {
        climate_zone: Some("7A".to_string()),
        ..zone_7b.clone()
    };

    assert_eq!(resolve_points(Category::WallRsi, "3.69", &zone_7b), 5.4);
    assert_eq!(resolve_points(Category::WallRsi, "3.69", &zone_7a), 6.7);
}

#[test]
fn single_detached_homes_only_score_unguarded_airtightness() {
    let selections = Selections {
        building_type: Some("single-detached".to_string()),
        ..Selections::default()
    };
    assert_eq!(resolve_points(Category::Airtightness, "AL-1A", &selections), 0.0);
    assert_eq!(resolve_points(Category::Airtightness, "AL-1B", &selections), 1.5);
}

#[test]
fn boiler_with_indirect_tank_drops_water_heater_points() {
    let mut selections = saskatchewan_multi_unit();
    selections.water_heater = Some("heat-pump-3.30".to_string());
    let with_heater = Scorecard::evaluate(&selections).total_points;

    selections.heating_type = Some("boiler".to_string());
    selections.indirect_tank = Some("yes".to_string());
    let without_heater = Scorecard::evaluate(&selections).total_points;

    assert_eq!(with_heater, 21.8);
    assert_eq!(without_heater, 16.9);
}

#[test]
fn prescriptive_pending_items_follow_the_pathway() {
    let selections = Selections {
        compliance_path: Some("9362".to_string()),
        ..Selections::default()
    };
    let pending = pending_items(&selections, &[]);
    let labels = pending.required_labels();

    assert!(labels.contains(&"At least 1 project document".to_string()));
    assert!(labels.contains(&"HRV/ERV".to_string()));
    assert!(!labels.contains(&"Front Door Orientation".to_string()));
    assert_eq!(pending.progress, 0.0);
}

#[test]
fn uploaded_documents_clear_the_document_requirement() {
    let file = UploadedFile {
        name: "energy-model.pdf".to_string(),
        url: "https://storage.example.com/energy-model.pdf".to_string(),
        size: 1_024,
        content_type: "application/pdf".to_string(),
        path: "projects/energy-model.pdf".to_string(),
    };
    let pending = pending_items(&Selections::default(), &[file]);

    assert!(!pending
        .required_labels()
        .contains(&"At least 1 project document".to_string()));
}
