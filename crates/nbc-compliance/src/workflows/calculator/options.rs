//! Energy conservation point tables for NBC 9.36.8.
//!
//! Every category carries a standard table and a table for Alberta climate
//! zone 7B. Rows are ordered from the least to the most efficient option so
//! that consumers can render them as-is.

use serde::{Deserialize, Serialize};

/// One selectable choice within a category and the points it is worth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NbcOption {
    pub value: &'static str,
    pub label: &'static str,
    pub points: f64,
}

const fn option(value: &'static str, label: &'static str, points: f64) -> NbcOption {
    NbcOption {
        value,
        label,
        points,
    }
}

/// Which specialization of a category table applies to a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableVariant {
    Standard,
    Zone7B,
}

/// Point tables for a single category.
#[derive(Debug)]
pub struct OptionTable {
    pub category: Category,
    pub standard: &'static [NbcOption],
    pub zone_7b: &'static [NbcOption],
}

impl OptionTable {
    pub fn options(&self, variant: TableVariant) -> &'static [NbcOption] {
        match variant {
            TableVariant::Standard => self.standard,
            TableVariant::Zone7B => self.zone_7b,
        }
    }

    pub fn find(&self, variant: TableVariant, value: &str) -> Option<&'static NbcOption> {
        self.options(variant)
            .iter()
            .find(|option| option.value == value)
    }
}

/// Scored selection categories, keyed the way the compliance form names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "atticRSI")]
    AtticRsi,
    #[serde(rename = "cathedralFlatRSI")]
    CathedralFlatRsi,
    #[serde(rename = "wallRSI")]
    WallRsi,
    #[serde(rename = "belowGradeRSI")]
    BelowGradeRsi,
    #[serde(rename = "floorsSlabsSelected")]
    FloorsSlabs,
    #[serde(rename = "windowUValue")]
    WindowUValue,
    #[serde(rename = "airtightness")]
    Airtightness,
    #[serde(rename = "hrv")]
    Hrv,
    #[serde(rename = "waterHeater")]
    WaterHeater,
    #[serde(rename = "buildingVolume")]
    BuildingVolume,
}

impl Category {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::AtticRsi,
            Self::CathedralFlatRsi,
            Self::WallRsi,
            Self::BelowGradeRsi,
            Self::FloorsSlabs,
            Self::WindowUValue,
            Self::Airtightness,
            Self::Hrv,
            Self::WaterHeater,
            Self::BuildingVolume,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::AtticRsi => "atticRSI",
            Self::CathedralFlatRsi => "cathedralFlatRSI",
            Self::WallRsi => "wallRSI",
            Self::BelowGradeRsi => "belowGradeRSI",
            Self::FloorsSlabs => "floorsSlabsSelected",
            Self::WindowUValue => "windowUValue",
            Self::Airtightness => "airtightness",
            Self::Hrv => "hrv",
            Self::WaterHeater => "waterHeater",
            Self::BuildingVolume => "buildingVolume",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AtticRsi => "Ceilings below Attics",
            Self::CathedralFlatRsi => "Cathedral Ceilings & Flat Roofs",
            Self::WallRsi => "Above Grade Walls",
            Self::BelowGradeRsi => "Below Grade Walls",
            Self::FloorsSlabs => "Floors & Slabs",
            Self::WindowUValue => "Windows & Doors",
            Self::Airtightness => "Airtightness",
            Self::Hrv => "HRV/ERV",
            Self::WaterHeater => "Water Heater",
            Self::BuildingVolume => "Building Volume",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.key() == key)
    }

    pub fn table(self) -> &'static OptionTable {
        match self {
            Self::AtticRsi => &ATTIC_RSI,
            Self::CathedralFlatRsi => &CATHEDRAL_FLAT_RSI,
            Self::WallRsi => &WALL_RSI,
            Self::BelowGradeRsi => &BELOW_GRADE_RSI,
            Self::FloorsSlabs => &FLOORS_SLABS,
            Self::WindowUValue => &WINDOW_U_VALUE,
            Self::Airtightness => &AIRTIGHTNESS,
            Self::Hrv => &HRV,
            Self::WaterHeater => &WATER_HEATER,
            Self::BuildingVolume => &BUILDING_VOLUME,
        }
    }
}

pub static ATTIC_RSI: OptionTable = OptionTable {
    category: Category::AtticRsi,
    standard: &[
        option("8.67", "RSI 8.67 (R-49.2)", 0.0),
        option("9.52", "RSI 9.52 (R-54.1)", 1.1),
        option("10.43", "RSI 10.43 (R-59.2)", 2.1),
        option("12.05", "RSI 12.05 (R-68.4)", 3.5),
        option("14.09", "RSI 14.09 (R-80.0)", 4.8),
    ],
    zone_7b: &[
        option("8.67", "RSI 8.67 (R-49.2)", 0.0),
        option("9.52", "RSI 9.52 (R-54.1)", 0.9),
        option("10.43", "RSI 10.43 (R-59.2)", 1.8),
        option("12.05", "RSI 12.05 (R-68.4)", 3.0),
        option("14.09", "RSI 14.09 (R-80.0)", 4.1),
    ],
};

pub static CATHEDRAL_FLAT_RSI: OptionTable = OptionTable {
    category: Category::CathedralFlatRsi,
    standard: &[
        option("5.02", "RSI 5.02 (R-28.5)", 0.0),
        option("5.46", "RSI 5.46 (R-31.0)", 0.6),
        option("6.17", "RSI 6.17 (R-35.0)", 1.3),
        option("6.86", "RSI 6.86 (R-39.0)", 1.9),
        option("7.57", "RSI 7.57 (R-43.0)", 2.4),
    ],
    zone_7b: &[
        option("5.02", "RSI 5.02 (R-28.5)", 0.0),
        option("5.46", "RSI 5.46 (R-31.0)", 0.5),
        option("6.17", "RSI 6.17 (R-35.0)", 1.1),
        option("6.86", "RSI 6.86 (R-39.0)", 1.6),
        option("7.57", "RSI 7.57 (R-43.0)", 2.0),
    ],
};

pub static WALL_RSI: OptionTable = OptionTable {
    category: Category::WallRsi,
    standard: &[
        option("2.97", "RSI 2.97 (R-16.9)", 0.0),
        option("3.08", "RSI 3.08 (R-17.5)", 1.6),
        option("3.69", "RSI 3.69 (R-21.0)", 6.7),
        option("3.85", "RSI 3.85 (R-21.9)", 7.4),
        option("3.96", "RSI 3.96 (R-22.5)", 8.0),
        option("4.29", "RSI 4.29 (R-24.4)", 9.7),
        option("4.76", "RSI 4.76 (R-27.0)", 11.8),
        option("5.10", "RSI 5.10 (R-29.0)", 13.0),
    ],
    zone_7b: &[
        option("2.97", "RSI 2.97 (R-16.9)", 0.0),
        option("3.08", "RSI 3.08 (R-17.5)", 1.3),
        option("3.69", "RSI 3.69 (R-21.0)", 5.4),
        option("3.85", "RSI 3.85 (R-21.9)", 6.0),
        option("3.96", "RSI 3.96 (R-22.5)", 6.5),
        option("4.29", "RSI 4.29 (R-24.4)", 7.9),
        option("4.76", "RSI 4.76 (R-27.0)", 9.6),
        option("5.10", "RSI 5.10 (R-29.0)", 10.6),
    ],
};

pub static BELOW_GRADE_RSI: OptionTable = OptionTable {
    category: Category::BelowGradeRsi,
    standard: &[
        option("2.98", "RSI 2.98 (R-16.9)", 0.0),
        option("3.09", "RSI 3.09 (R-17.5)", 0.2),
        option("3.46", "RSI 3.46 (R-19.6)", 0.8),
        option("3.90", "RSI 3.90 (R-22.1)", 1.4),
        option("4.23", "RSI 4.23 (R-24.0)", 1.9),
        option("4.65", "RSI 4.65 (R-26.4)", 2.5),
    ],
    zone_7b: &[
        option("2.98", "RSI 2.98 (R-16.9)", 0.0),
        option("3.09", "RSI 3.09 (R-17.5)", 0.2),
        option("3.46", "RSI 3.46 (R-19.6)", 0.7),
        option("3.90", "RSI 3.90 (R-22.1)", 1.2),
        option("4.23", "RSI 4.23 (R-24.0)", 1.6),
        option("4.65", "RSI 4.65 (R-26.4)", 2.1),
    ],
};

pub static FLOORS_SLABS: OptionTable = OptionTable {
    category: Category::FloorsSlabs,
    standard: &[
        option(
            "unheated-floor-below-frost",
            "Unheated floor below frost line (uninsulated)",
            0.0,
        ),
        option(
            "unheated-floor-above-frost",
            "Unheated floor above frost line (RSI 2.84)",
            0.6,
        ),
        option("heated-floor", "Heated floor (RSI 2.84)", 0.7),
        option(
            "slab-integral-footing",
            "Slab-on-grade with integral footing (RSI 3.72)",
            0.9,
        ),
        option(
            "floor-over-unheated",
            "Floor over unheated space (RSI 5.02)",
            1.2,
        ),
    ],
    zone_7b: &[
        option(
            "unheated-floor-below-frost",
            "Unheated floor below frost line (uninsulated)",
            0.0,
        ),
        option(
            "unheated-floor-above-frost",
            "Unheated floor above frost line (RSI 2.84)",
            0.5,
        ),
        option("heated-floor", "Heated floor (RSI 2.84)", 0.6),
        option(
            "slab-integral-footing",
            "Slab-on-grade with integral footing (RSI 3.72)",
            0.8,
        ),
        option(
            "floor-over-unheated",
            "Floor over unheated space (RSI 5.02)",
            1.0,
        ),
    ],
};

pub static WINDOW_U_VALUE: OptionTable = OptionTable {
    category: Category::WindowUValue,
    standard: &[
        option("1.61", "U-1.61 W/m²·K (U-0.28)", 0.0),
        option("1.44", "U-1.44 W/m²·K (U-0.25)", 1.5),
        option("1.36", "U-1.36 W/m²·K (U-0.24)", 2.4),
        option("1.28", "U-1.28 W/m²·K (U-0.23)", 3.4),
        option("1.22", "U-1.22 W/m²·K (U-0.21)", 4.1),
        option("1.14", "U-1.14 W/m²·K (U-0.20)", 5.2),
        option("1.03", "U-1.03 W/m²·K (U-0.18)", 6.6),
    ],
    zone_7b: &[
        option("1.61", "U-1.61 W/m²·K (U-0.28)", 0.0),
        option("1.44", "U-1.44 W/m²·K (U-0.25)", 1.2),
        option("1.36", "U-1.36 W/m²·K (U-0.24)", 1.9),
        option("1.28", "U-1.28 W/m²·K (U-0.23)", 2.7),
        option("1.22", "U-1.22 W/m²·K (U-0.21)", 3.3),
        option("1.14", "U-1.14 W/m²·K (U-0.20)", 4.2),
        option("1.03", "U-1.03 W/m²·K (U-0.18)", 5.3),
    ],
};

/// `A` levels come from guarded (multi-unit) tests, `B` levels from unguarded tests.
pub static AIRTIGHTNESS: OptionTable = OptionTable {
    category: Category::Airtightness,
    standard: &[
        option("AL-1A", "AL-1A (3.0 ACH50, guarded)", 1.2),
        option("AL-2A", "AL-2A (2.5 ACH50, guarded)", 4.6),
        option("AL-3A", "AL-3A (2.0 ACH50, guarded)", 9.3),
        option("AL-4A", "AL-4A (1.5 ACH50, guarded)", 13.9),
        option("AL-5A", "AL-5A (1.0 ACH50, guarded)", 18.5),
        option("AL-6A", "AL-6A (0.6 ACH50, guarded)", 23.1),
        option("AL-1B", "AL-1B (3.0 ACH50)", 1.5),
        option("AL-2B", "AL-2B (2.5 ACH50)", 5.2),
        option("AL-3B", "AL-3B (2.0 ACH50)", 9.9),
        option("AL-4B", "AL-4B (1.5 ACH50)", 14.6),
        option("AL-5B", "AL-5B (1.0 ACH50)", 19.3),
        option("AL-6B", "AL-6B (0.6 ACH50)", 24.0),
    ],
    zone_7b: &[
        option("AL-1A", "AL-1A (3.0 ACH50, guarded)", 1.0),
        option("AL-2A", "AL-2A (2.5 ACH50, guarded)", 3.8),
        option("AL-3A", "AL-3A (2.0 ACH50, guarded)", 7.6),
        option("AL-4A", "AL-4A (1.5 ACH50, guarded)", 11.4),
        option("AL-5A", "AL-5A (1.0 ACH50, guarded)", 15.2),
        option("AL-6A", "AL-6A (0.6 ACH50, guarded)", 19.0),
        option("AL-1B", "AL-1B (3.0 ACH50)", 1.2),
        option("AL-2B", "AL-2B (2.5 ACH50)", 4.3),
        option("AL-3B", "AL-3B (2.0 ACH50)", 8.1),
        option("AL-4B", "AL-4B (1.5 ACH50)", 12.0),
        option("AL-5B", "AL-5B (1.0 ACH50)", 15.9),
        option("AL-6B", "AL-6B (0.6 ACH50)", 19.8),
    ],
};

pub static HRV: OptionTable = OptionTable {
    category: Category::Hrv,
    standard: &[
        option("60", "60% SRE", 0.0),
        option("65", "65% SRE", 0.7),
        option("70", "70% SRE", 1.4),
        option("75", "75% SRE", 2.2),
        option("78", "78% SRE", 2.6),
        option("81", "81% SRE", 3.1),
        option("84", "84% SRE", 3.5),
    ],
    zone_7b: &[
        option("60", "60% SRE", 0.0),
        option("65", "65% SRE", 0.9),
        option("70", "70% SRE", 1.8),
        option("75", "75% SRE", 2.7),
        option("78", "78% SRE", 3.2),
        option("81", "81% SRE", 3.8),
        option("84", "84% SRE", 4.3),
    ],
};

pub static WATER_HEATER: OptionTable = OptionTable {
    category: Category::WaterHeater,
    standard: &[
        option("gas-storage-0.69", "Gas storage (UEF 0.69)", 0.0),
        option("gas-storage-0.80", "Gas storage (UEF 0.80)", 1.1),
        option(
            "gas-condensing-storage-0.90",
            "Condensing gas storage (UEF 0.90)",
            2.0,
        ),
        option("gas-tankless-0.93", "Tankless gas (UEF 0.93)", 2.4),
        option("heat-pump-3.30", "Heat pump water heater (UEF 3.30)", 4.9),
    ],
    zone_7b: &[
        option("gas-storage-0.69", "Gas storage (UEF 0.69)", 0.0),
        option("gas-storage-0.80", "Gas storage (UEF 0.80)", 1.2),
        option(
            "gas-condensing-storage-0.90",
            "Condensing gas storage (UEF 0.90)",
            2.2,
        ),
        option("gas-tankless-0.93", "Tankless gas (UEF 0.93)", 2.6),
        option("heat-pump-3.30", "Heat pump water heater (UEF 3.30)", 3.9),
    ],
};

const BUILDING_VOLUME_OPTIONS: &[NbcOption] = &[
    option("331-380", "331 to 380 m³", 1.0),
    option("281-330", "281 to 330 m³", 2.0),
    option("231-280", "231 to 280 m³", 3.0),
    option("181-230", "181 to 230 m³", 4.0),
    option("0-180", "180 m³ or less", 5.0),
];

/// Volume brackets do not vary by climate zone.
pub static BUILDING_VOLUME: OptionTable = OptionTable {
    category: Category::BuildingVolume,
    standard: BUILDING_VOLUME_OPTIONS,
    zone_7b: BUILDING_VOLUME_OPTIONS,
};

/// Indicative installed cost of an upgrade, for reference listings only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UpgradeCost {
    pub category: Category,
    pub value: &'static str,
    pub description: &'static str,
    pub cost: u32,
}

pub static UPGRADE_COSTS: &[UpgradeCost] = &[
    UpgradeCost {
        category: Category::AtticRsi,
        value: "10.43",
        description: "Add blown-in insulation to RSI 10.43",
        cost: 1150,
    },
    UpgradeCost {
        category: Category::WallRsi,
        value: "3.85",
        description: "2x6 walls with 1 in. exterior mineral wool",
        cost: 4200,
    },
    UpgradeCost {
        category: Category::WallRsi,
        value: "4.29",
        description: "2x6 walls with 2 in. exterior mineral wool",
        cost: 6900,
    },
    UpgradeCost {
        category: Category::BelowGradeRsi,
        value: "3.46",
        description: "Upgrade basement wall batts with continuous foam",
        cost: 1800,
    },
    UpgradeCost {
        category: Category::WindowUValue,
        value: "1.22",
        description: "Triple-glazed windows",
        cost: 5600,
    },
    UpgradeCost {
        category: Category::Airtightness,
        value: "AL-3B",
        description: "Air barrier detailing with mid-construction blower door test",
        cost: 1400,
    },
    UpgradeCost {
        category: Category::Hrv,
        value: "75",
        description: "75% SRE heat recovery ventilator",
        cost: 950,
    },
    UpgradeCost {
        category: Category::WaterHeater,
        value: "gas-tankless-0.93",
        description: "Tankless gas water heater",
        cost: 1250,
    },
];
