//! Pure query functions over a loaded recipe table.
//!
//! Nothing in here touches the filesystem or HTTP; every function takes the
//! records of one dataset snapshot and returns plain serializable values.

pub mod clusters;
pub mod pagination;
pub mod statistics;
pub mod summary;
pub mod top_protein;

pub use clusters::{cluster_diet_types, ClusterReport, HIGH_CARB_THRESHOLD_G, HIGH_PROTEIN_THRESHOLD_G};
pub use pagination::{paginate, Page, PaginationError, DEFAULT_PAGE, DEFAULT_PER_PAGE};
pub use statistics::{recipe_statistics, RecipeStatistics};
pub use summary::{summarize_by_diet, DietAggregate};
pub use top_protein::{top_protein, ProteinPick, DEFAULT_TOP_PROTEIN_LIMIT};

/// Arithmetic mean, or `None` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Rounds to `places` decimal places, sending exact halves to the even digit.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_empty_input_is_none() {
        assert_eq!(mean(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_mean_simple() {
        assert_eq!(mean([10.0, 5.0]), Some(7.5));
        assert_eq!(mean([42.0]), Some(42.0));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.3456, 2), 12.35);
        assert_eq!(round_to(12.3456, 1), 12.3);
        assert_eq!(round_to(90.0, 2), 90.0);
    }

    #[test]
    fn test_round_to_sends_halves_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(7.25, 1), 7.2);
        assert_eq!(round_to(2.5, 0), 2.0);
    }
}
