use serde::Serialize;
use std::collections::BTreeMap;

use crate::dataset::RecipeRecord;

/// Mean macronutrients and recipe count for one diet type.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DietAggregate {
    #[serde(rename = "Diet_type")]
    pub diet_type: String,
    #[serde(rename = "Protein")]
    pub protein: f64,
    #[serde(rename = "Carbs")]
    pub carbs: f64,
    #[serde(rename = "Fat")]
    pub fat: f64,
    pub recipes: usize,
}

#[derive(Default)]
struct Totals {
    protein: f64,
    carbs: f64,
    fat: f64,
    count: usize,
}

/// Groups records by their exact diet-type label and averages each group.
///
/// Output is sorted by label. Groups are built from existing records so no
/// aggregate ever has a zero count.
pub fn summarize_by_diet(records: &[RecipeRecord]) -> Vec<DietAggregate> {
    let mut groups: BTreeMap<&str, Totals> = BTreeMap::new();
    for record in records {
        let totals = groups.entry(record.diet_type.as_str()).or_default();
        totals.protein += record.protein_g;
        totals.carbs += record.carbs_g;
        totals.fat += record.fat_g;
        totals.count += 1;
    }

    groups
        .into_iter()
        .map(|(diet_type, t)| {
            let n = t.count as f64;
            DietAggregate {
                diet_type: diet_type.to_string(),
                protein: t.protein / n,
                carbs: t.carbs / n,
                fat: t.fat / n,
                recipes: t.count,
            }
        })
        .collect()
}
