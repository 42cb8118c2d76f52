use serde::{Deserialize, Serialize};

use super::options::{Category, TableVariant};

/// Every value a user has entered for one project in progress.
///
/// Field names match the compliance form ids. Text fields accept strings or
/// numbers; any other JSON shape is read as "no selection" so a partially
/// filled or stale form never fails to load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Selections {
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub building_type: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub climate_zone: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub compliance_path: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub front_door_orientation: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub annual_energy_consumption: Option<String>,
    #[serde(
        rename = "atticRSI",
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub attic_rsi: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub has_cathedral_or_flat_roof: Option<String>,
    #[serde(
        rename = "cathedralFlatRSI",
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub cathedral_flat_rsi: Option<String>,
    #[serde(
        rename = "wallRSI",
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub wall_rsi: Option<String>,
    #[serde(
        rename = "belowGradeRSI",
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub below_grade_rsi: Option<String>,
    #[serde(deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub floors_slabs_selected: Vec<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub window_u_value: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub airtightness: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub has_hrv: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub hrv: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub heating_type: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub heating_efficiency: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub indirect_tank: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub indirect_tank_size: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub water_heater_type: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub water_heater: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub is_volume_over380: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub building_volume: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub mid_construction_blower_door_planned: bool,
}

/// Borrowed view of one form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    List(&'a [String]),
    Flag(bool),
}

impl FieldValue<'_> {
    /// Absent values, blank text, and empty lists are missing. Flags never are.
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Text(value) => value.map_or(true, |text| text.trim().is_empty()),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Flag(_) => false,
        }
    }
}

/// Compliance pathways defined by NBC 9.36.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CompliancePath {
    #[serde(rename = "9362")]
    Prescriptive,
    #[serde(rename = "9365")]
    Performance,
    #[serde(rename = "9367")]
    TieredPerformance,
    #[serde(rename = "9368")]
    TieredPrescriptive,
}

impl CompliancePath {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Prescriptive,
            Self::Performance,
            Self::TieredPerformance,
            Self::TieredPrescriptive,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Prescriptive => "9362",
            Self::Performance => "9365",
            Self::TieredPerformance => "9367",
            Self::TieredPrescriptive => "9368",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Prescriptive => "Prescriptive (9.36.2 - 9.36.4)",
            Self::Performance => "Performance (9.36.5)",
            Self::TieredPerformance => "Tiered Performance (9.36.7)",
            Self::TieredPrescriptive => "Tiered Prescriptive (9.36.8)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|path| path.code() == code.trim())
    }

    pub const fn is_performance(self) -> bool {
        matches!(self, Self::Performance | Self::TieredPerformance)
    }
}

impl Selections {
    pub fn text(&self, field_id: &str) -> Option<&str> {
        match self.field(field_id) {
            Some(FieldValue::Text(value)) => value,
            _ => None,
        }
    }

    /// Look up a form field by its id. Unknown ids yield `None`.
    pub fn field(&self, field_id: &str) -> Option<FieldValue<'_>> {
        fn text(value: &Option<String>) -> FieldValue<'_> {
            FieldValue::Text(value.as_deref())
        }

        let value = match field_id {
            "firstName" => text(&self.first_name),
            "lastName" => text(&self.last_name),
            "company" => text(&self.company),
            "phoneNumber" => text(&self.phone_number),
            "streetAddress" => text(&self.street_address),
            "unitNumber" => text(&self.unit_number),
            "city" => text(&self.city),
            "postalCode" => text(&self.postal_code),
            "province" => text(&self.province),
            "buildingType" => text(&self.building_type),
            "climateZone" => text(&self.climate_zone),
            "compliancePath" => text(&self.compliance_path),
            "frontDoorOrientation" => text(&self.front_door_orientation),
            "annualEnergyConsumption" => text(&self.annual_energy_consumption),
            "atticRSI" => text(&self.attic_rsi),
            "hasCathedralOrFlatRoof" => text(&self.has_cathedral_or_flat_roof),
            "cathedralFlatRSI" => text(&self.cathedral_flat_rsi),
            "wallRSI" => text(&self.wall_rsi),
            "belowGradeRSI" => text(&self.below_grade_rsi),
            "floorsSlabsSelected" => FieldValue::List(&self.floors_slabs_selected),
            "windowUValue" => text(&self.window_u_value),
            "airtightness" => text(&self.airtightness),
            "hasHrv" => text(&self.has_hrv),
            "hrv" => text(&self.hrv),
            "heatingType" => text(&self.heating_type),
            "heatingEfficiency" => text(&self.heating_efficiency),
            "indirectTank" => text(&self.indirect_tank),
            "indirectTankSize" => text(&self.indirect_tank_size),
            "waterHeaterType" => text(&self.water_heater_type),
            "waterHeater" => text(&self.water_heater),
            "isVolumeOver380" => text(&self.is_volume_over380),
            "buildingVolume" => text(&self.building_volume),
            "midConstructionBlowerDoorPlanned" => {
                FieldValue::Flag(self.mid_construction_blower_door_planned)
            }
            _ => return None,
        };
        Some(value)
    }

    /// The value held for a scored category.
    pub fn category_value(&self, category: Category) -> FieldValue<'_> {
        self.field(category.key())
            .unwrap_or(FieldValue::Text(None))
    }

    pub fn is_alberta(&self) -> bool {
        self.province.as_deref() == Some("alberta")
    }

    pub fn table_variant(&self) -> TableVariant {
        if self.is_alberta() && self.climate_zone.as_deref() == Some("7B") {
            TableVariant::Zone7B
        } else {
            TableVariant::Standard
        }
    }

    /// Single-detached homes, with or without a secondary suite.
    pub fn is_single_detached(&self) -> bool {
        matches!(
            self.building_type.as_deref(),
            Some("single-detached") | Some("single-detached-secondary-suite")
        )
    }

    pub fn compliance_path(&self) -> Option<CompliancePath> {
        self.compliance_path
            .as_deref()
            .and_then(CompliancePath::from_code)
    }

    pub fn has_indirect_tank(&self) -> bool {
        self.indirect_tank.as_deref() == Some("yes")
    }

    pub fn boiler_with_indirect_tank(&self) -> bool {
        self.heating_type.as_deref() == Some("boiler") && self.has_indirect_tank()
    }

    pub fn with_hrv(&self) -> bool {
        self.has_hrv.as_deref() == Some("with_hrv")
    }

    pub fn without_hrv(&self) -> bool {
        self.has_hrv.as_deref() == Some("no_hrv")
    }

    pub fn has_cathedral_or_flat_roof(&self) -> bool {
        self.has_cathedral_or_flat_roof.as_deref() == Some("yes")
    }

    pub fn volume_over_380(&self) -> bool {
        self.is_volume_over380.as_deref() == Some("yes")
    }

    pub fn volume_under_380(&self) -> bool {
        self.is_volume_over380.as_deref() == Some("no")
    }
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(scalar_text))
    }

    pub(super) fn list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        let items = match value {
            Some(Value::Array(items)) => items.into_iter().filter_map(scalar_text).collect(),
            Some(Value::String(item)) if !item.trim().is_empty() => vec![item],
            _ => Vec::new(),
        };
        Ok(items)
    }

    pub(super) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Bool(flag)) => flag,
            Some(Value::String(text)) => matches!(text.trim(), "true" | "yes"),
            _ => false,
        })
    }

    fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(text) => Some(text),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }
}
