use serde::Serialize;

use super::round_to;
use crate::dataset::RecipeRecord;

pub const DEFAULT_TOP_PROTEIN_LIMIT: i64 = 5;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ProteinPick {
    pub recipe: String,
    pub protein: f64,
    pub carbs: f64,
}

/// Selects the `limit` most protein-rich recipes, highest first.
///
/// The sort is stable, so recipes with equal protein keep their dataset order.
/// A non-positive `limit` selects nothing; a `limit` past the end selects
/// every record. Protein and carbs are rounded to one decimal for display.
pub fn top_protein(records: &[RecipeRecord], limit: i64) -> Vec<ProteinPick> {
    let Ok(limit) = usize::try_from(limit) else {
        return Vec::new();
    };

    let mut ranked: Vec<&RecipeRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.protein_g.total_cmp(&a.protein_g));

    ranked
        .into_iter()
        .take(limit)
        .map(|r| ProteinPick {
            recipe: r.name.clone(),
            protein: round_to(r.protein_g, 1),
            carbs: round_to(r.carbs_g, 1),
        })
        .collect()
}
