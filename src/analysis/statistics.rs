use serde::Serialize;

use super::{mean, round_to};
use crate::dataset::RecipeRecord;

/// Count and mean macronutrients of a (possibly filtered) set of recipes.
///
/// When no recipe matches, `total_recipes` is 0 and every mean is `None`,
/// which serializes as JSON `null`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RecipeStatistics {
    pub total_recipes: usize,
    pub avg_protein: Option<f64>,
    pub avg_carbs: Option<f64>,
    pub avg_fat: Option<f64>,
}

impl RecipeStatistics {
    pub fn has_matches(&self) -> bool {
        self.total_recipes > 0
    }
}

/// Computes statistics over all records, or only those whose diet type
/// equals `diet_type` ignoring case. An empty filter string means no filter.
pub fn recipe_statistics(records: &[RecipeRecord], diet_type: Option<&str>) -> RecipeStatistics {
    let wanted = diet_type.filter(|d| !d.is_empty()).map(str::to_lowercase);
    let selected: Vec<&RecipeRecord> = records
        .iter()
        .filter(|r| match &wanted {
            Some(w) => r.diet_type.to_lowercase() == *w,
            None => true,
        })
        .collect();

    let avg = |field: fn(&RecipeRecord) -> f64| {
        mean(selected.iter().map(|r| field(r))).map(|m| round_to(m, 2))
    };

    RecipeStatistics {
        total_recipes: selected.len(),
        avg_protein: avg(|r| r.protein_g),
        avg_carbs: avg(|r| r.carbs_g),
        avg_fat: avg(|r| r.fat_g),
    }
}
