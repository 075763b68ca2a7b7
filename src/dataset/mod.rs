pub mod loader;
pub mod source;

use serde_json::{Map, Value};
use std::path::PathBuf;

pub use loader::load_recipe_dataset;
pub use source::{DatasetSource, ReloadPolicy};

/// One row of the recipe table.
///
/// The macronutrient fields are parsed for aggregation; `columns` keeps every
/// cell of the row (including the ones we never interpret) in source column
/// order so the listing endpoint can hand rows back untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeRecord {
    pub name: String,
    pub diet_type: String,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub columns: Map<String, Value>,
}

/// A fully loaded, immutable snapshot of the dataset file.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<RecipeRecord>,
    pub skipped_rows: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset file not found at {0:?}")]
    NotFound(PathBuf),
    #[error("failed to read dataset file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset file {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("column '{0}' not found in dataset header")]
    MissingColumn(&'static str),
    #[error("no valid recipe rows loaded from {0:?}")]
    Empty(PathBuf),
    #[error("dataset loader task failed: {0}")]
    LoaderPanicked(String),
}
