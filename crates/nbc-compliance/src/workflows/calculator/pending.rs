use serde::Serialize;

use super::selections::{CompliancePath, Selections};
use crate::workflows::files::UploadedFile;

/// Progress is reported against a fixed count of ten required items.
const PROGRESS_DENOMINATOR: f64 = 10.0;

pub const DOCUMENTS_LABEL: &str = "At least 1 project document";
pub const DOCUMENTS_FIELD_ID: &str = "uploadedFiles";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingItem {
    pub label: &'static str,
    pub field_id: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingItems {
    pub required: Vec<PendingItem>,
    pub optional: Vec<PendingItem>,
    pub progress: f64,
}

impl PendingItems {
    pub fn is_complete(&self) -> bool {
        self.required.is_empty()
    }

    pub fn required_labels(&self) -> Vec<String> {
        self.required
            .iter()
            .map(|item| item.label.to_string())
            .collect()
    }
}

struct FieldRule {
    label: &'static str,
    field_id: &'static str,
    applies: fn(&Selections) -> bool,
}

fn every_project(_: &Selections) -> bool {
    true
}

const fn always(label: &'static str, field_id: &'static str) -> FieldRule {
    FieldRule {
        label,
        field_id,
        applies: every_project,
    }
}

const fn when(
    label: &'static str,
    field_id: &'static str,
    applies: fn(&Selections) -> bool,
) -> FieldRule {
    FieldRule {
        label,
        field_id,
        applies,
    }
}

fn needs_water_heater(selections: &Selections) -> bool {
    !selections.boiler_with_indirect_tank()
}

const BASE_REQUIRED: &[FieldRule] = &[
    always("First Name", "firstName"),
    always("Last Name", "lastName"),
    always("Company Name", "company"),
    always("Phone Number", "phoneNumber"),
    always("Street Address", "streetAddress"),
    always("City/Town", "city"),
    always("Postal Code", "postalCode"),
    always("Province", "province"),
    always("Building Type", "buildingType"),
    when("Climate Zone", "climateZone", Selections::is_alberta),
    always("Compliance Path", "compliancePath"),
];

const PRESCRIPTIVE_REQUIRED: &[FieldRule] = &[
    always("Ceilings below Attics RSI", "atticRSI"),
    when(
        "Cathedral/Flat Roof RSI",
        "cathedralFlatRSI",
        Selections::has_cathedral_or_flat_roof,
    ),
    always("Above Grade Walls RSI", "wallRSI"),
    always("Below Grade Walls RSI", "belowGradeRSI"),
    always("Floors/Slabs", "floorsSlabsSelected"),
    always("Windows/Doors U-Value", "windowUValue"),
    always("HRV/ERV", "hasHrv"),
    when("HRV/ERV Efficiency", "hrv", Selections::with_hrv),
    always("Heating Type", "heatingType"),
    always("Heating Efficiency", "heatingEfficiency"),
    always("Water Heater Type", "waterHeaterType"),
    when("Water Heater Efficiency", "waterHeater", needs_water_heater),
    when(
        "Indirect Tank Size",
        "indirectTankSize",
        Selections::has_indirect_tank,
    ),
];

const PRESCRIPTIVE_OPTIONAL: &[FieldRule] = &[
    always("Airtightness Level", "airtightness"),
    always("Building Volume", "buildingVolume"),
];

const PERFORMANCE_REQUIRED: &[FieldRule] = &[
    always("Front Door Orientation", "frontDoorOrientation"),
    always("Ceilings below Attics RSI", "atticRSI"),
    always("Above Grade Walls RSI", "wallRSI"),
    always("Below Grade Walls RSI", "belowGradeRSI"),
    always("Windows/Doors U-Value", "windowUValue"),
    always("Airtightness Level", "airtightness"),
    always("Heating Type", "heatingType"),
    always("Heating Efficiency", "heatingEfficiency"),
    always("Water Heater Type", "waterHeaterType"),
    always("HRV/ERV", "hasHrv"),
];

const PERFORMANCE_OPTIONAL: &[FieldRule] = &[
    always("Annual Energy Consumption", "annualEnergyConsumption"),
    when("HRV/ERV Efficiency", "hrv", Selections::with_hrv),
    when(
        "Indirect Tank Size",
        "indirectTankSize",
        Selections::has_indirect_tank,
    ),
    when(
        "Cathedral/Flat Roof RSI",
        "cathedralFlatRSI",
        Selections::has_cathedral_or_flat_roof,
    ),
];

const TIERED_PRESCRIPTIVE_REQUIRED: &[FieldRule] = &[
    always("Ceilings below Attics RSI", "atticRSI"),
    when(
        "Cathedral/Flat Roof RSI",
        "cathedralFlatRSI",
        Selections::has_cathedral_or_flat_roof,
    ),
    always("Above Grade Walls RSI", "wallRSI"),
    always("Below Grade Walls RSI", "belowGradeRSI"),
    always("Floors/Slabs", "floorsSlabsSelected"),
    always("Windows/Doors U-Value", "windowUValue"),
    always("Airtightness Level", "airtightness"),
    always("HRV/ERV", "hasHrv"),
    when("HRV/ERV Efficiency", "hrv", Selections::with_hrv),
    when("Water Heater Efficiency", "waterHeater", needs_water_heater),
    when(
        "Indirect Tank Size",
        "indirectTankSize",
        Selections::has_indirect_tank,
    ),
    always("Building Volume over 380 m³", "isVolumeOver380"),
    when(
        "Building Volume",
        "buildingVolume",
        Selections::volume_under_380,
    ),
];

const TIERED_PRESCRIPTIVE_OPTIONAL: &[FieldRule] = &[
    always("Heating Type", "heatingType"),
    always("Heating Efficiency", "heatingEfficiency"),
];

fn pathway_rules(path: CompliancePath) -> (&'static [FieldRule], &'static [FieldRule]) {
    match path {
        CompliancePath::Prescriptive => (PRESCRIPTIVE_REQUIRED, PRESCRIPTIVE_OPTIONAL),
        CompliancePath::Performance | CompliancePath::TieredPerformance => {
            (PERFORMANCE_REQUIRED, PERFORMANCE_OPTIONAL)
        }
        CompliancePath::TieredPrescriptive => {
            (TIERED_PRESCRIPTIVE_REQUIRED, TIERED_PRESCRIPTIVE_OPTIONAL)
        }
    }
}

fn missing<'a>(
    rules: &'a [FieldRule],
    selections: &'a Selections,
) -> impl Iterator<Item = PendingItem> + 'a {
    rules
        .iter()
        .filter(move |rule| (rule.applies)(selections))
        .filter(move |rule| {
            selections
                .field(rule.field_id)
                .map_or(true, |value| value.is_missing())
        })
        .map(|rule| PendingItem {
            label: rule.label,
            field_id: rule.field_id,
        })
}

/// Required and recommended fields still empty for the chosen pathway.
pub fn pending_items(selections: &Selections, uploaded_files: &[UploadedFile]) -> PendingItems {
    let mut required: Vec<PendingItem> = missing(BASE_REQUIRED, selections).collect();
    if uploaded_files.is_empty() {
        required.push(PendingItem {
            label: DOCUMENTS_LABEL,
            field_id: DOCUMENTS_FIELD_ID,
        });
    }

    let mut optional = Vec::new();
    if let Some(path) = selections.compliance_path() {
        let (path_required, path_optional) = pathway_rules(path);
        required.extend(missing(path_required, selections));
        optional.extend(missing(path_optional, selections));
    }

    let progress =
        ((PROGRESS_DENOMINATOR - required.len() as f64) / PROGRESS_DENOMINATOR * 100.0).max(0.0);

    PendingItems {
        required,
        optional,
        progress,
    }
}
