use serde::Serialize;

use super::summary::DietAggregate;

// Fixed cut-offs in grams of mean macronutrient per recipe.
// TODO: make these overridable from ServiceConfig.
pub const HIGH_PROTEIN_THRESHOLD_G: f64 = 90.0;
pub const HIGH_CARB_THRESHOLD_G: f64 = 200.0;

pub const CLUSTER_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroCluster {
    HighProtein,
    HighCarb,
    Balanced,
}

impl MacroCluster {
    /// High protein wins over high carb; both comparisons are strict.
    pub fn classify(aggregate: &DietAggregate) -> Self {
        if aggregate.protein > HIGH_PROTEIN_THRESHOLD_G {
            MacroCluster::HighProtein
        } else if aggregate.carbs > HIGH_CARB_THRESHOLD_G {
            MacroCluster::HighCarb
        } else {
            MacroCluster::Balanced
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct ClusterReport {
    pub clusters_identified: usize,
    pub high_protein_cluster: Vec<String>,
    pub high_carb_cluster: Vec<String>,
    pub balanced_cluster: Vec<String>,
}

/// Partitions diet types into three disjoint clusters by their mean macros.
pub fn cluster_diet_types(summary: &[DietAggregate]) -> ClusterReport {
    let mut report = ClusterReport {
        clusters_identified: CLUSTER_COUNT,
        ..Default::default()
    };

    for aggregate in summary {
        let bucket = match MacroCluster::classify(aggregate) {
            MacroCluster::HighProtein => &mut report.high_protein_cluster,
            MacroCluster::HighCarb => &mut report.high_carb_cluster,
            MacroCluster::Balanced => &mut report.balanced_cluster,
        };
        bucket.push(aggregate.diet_type.clone());
    }

    report
}
