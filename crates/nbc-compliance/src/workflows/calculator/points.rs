use serde::{Deserialize, Serialize};

use super::options::{Category, NbcOption};
use super::selections::{FieldValue, Selections};

/// Points a single selected value is worth for `category`.
///
/// Values that are not in the applicable table score zero.
pub fn resolve_points(category: Category, value: &str, selections: &Selections) -> f64 {
    if category == Category::BuildingVolume && selections.volume_over_380() {
        return 0.0;
    }

    let value = value.trim();
    let options = category.table().options(selections.table_variant());

    let matches = |option: &&NbcOption| option.value == value;
    let found = if category == Category::Airtightness && selections.is_single_detached() {
        options
            .iter()
            .filter(|option| option.value.contains('B'))
            .find(matches)
    } else {
        options.iter().find(matches)
    };

    found.map_or(0.0, |option| option.points)
}

/// String-keyed lookup for callers holding a raw form key; unknown keys score zero.
pub fn points_for_key(category_key: &str, value: &str, selections: &Selections) -> f64 {
    Category::from_key(category_key)
        .map_or(0.0, |category| resolve_points(category, value, selections))
}

/// Contribution of one populated category to the project total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPoints {
    pub category: Category,
    pub label: String,
    pub points: f64,
}

/// Per-category contributions for every populated selection.
pub fn category_breakdown(selections: &Selections) -> Vec<CategoryPoints> {
    Category::ordered()
        .into_iter()
        .filter_map(|category| {
            if category == Category::WaterHeater && selections.boiler_with_indirect_tank() {
                return None;
            }

            let points = match selections.category_value(category) {
                value if value.is_missing() => return None,
                FieldValue::Text(Some(value)) => resolve_points(category, value, selections),
                FieldValue::List(values) => values
                    .iter()
                    .map(|value| resolve_points(category, value, selections))
                    .sum(),
                FieldValue::Text(None) | FieldValue::Flag(_) => 0.0,
            };

            Some(CategoryPoints {
                category,
                label: category.label().to_string(),
                points: round_points(points),
            })
        })
        .collect()
}

pub fn total_points(selections: &Selections) -> f64 {
    let sum: f64 = category_breakdown(selections)
        .iter()
        .map(|entry| entry.points)
        .sum();
    round_points(sum)
}

/// Tables are tabulated to one decimal place; sums are reported the same way.
pub(crate) fn round_points(points: f64) -> f64 {
    (points * 10.0).round() / 10.0
}
