use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::{Map, Number, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

use super::{Dataset, DatasetError, RecipeRecord};

// Expected column headers
pub const NAME_COL: &str = "Recipe_name";
pub const DIET_TYPE_COL: &str = "Diet_type";
pub const PROTEIN_COL: &str = "Protein(g)";
pub const CARBS_COL: &str = "Carbs(g)";
pub const FAT_COL: &str = "Fat(g)";

struct ColumnIndices {
    name: usize,
    diet_type: usize,
    protein: usize,
    carbs: usize,
    fat: usize,
}

impl ColumnIndices {
    fn resolve(headers: &[String]) -> Result<Self, DatasetError> {
        let find = |col: &'static str| {
            headers
                .iter()
                .position(|h| h == col)
                .ok_or(DatasetError::MissingColumn(col))
        };
        Ok(Self {
            name: find(NAME_COL)?,
            diet_type: find(DIET_TYPE_COL)?,
            protein: find(PROTEIN_COL)?,
            carbs: find(CARBS_COL)?,
            fat: find(FAT_COL)?,
        })
    }
}

/// Renames repeated header names `name.1`, `name.2`, ... so every column
/// keeps its own cell. The first occurrence keeps the plain name.
fn unique_headers(raw: &StringRecord) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());
    for name in raw.iter() {
        let mut unique = name.to_string();
        let mut suffix = 1;
        while taken.contains(&unique) {
            unique = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        taken.insert(unique.clone());
        headers.push(unique);
    }
    headers
}

/// Macronutrient cells must hold a finite, non-negative number of grams.
fn parse_grams(s: &str) -> Option<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Types a pass-through cell the way a dataframe would: integers and floats
/// stay numeric, blanks become `null`, everything else is text.
fn cell_to_json(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Some(n) = s.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(s.to_string())
}

/// Loads the recipe table from `csv_path`.
///
/// Rows with a missing or unparseable macronutrient, or with the wrong number
/// of fields, are skipped and counted in [`Dataset::skipped_rows`]. A file that
/// yields no usable row at all is reported as [`DatasetError::Empty`].
pub fn load_recipe_dataset(csv_path: &Path) -> Result<Dataset, DatasetError> {
    if !csv_path.exists() {
        return Err(DatasetError::NotFound(csv_path.to_path_buf()));
    }

    let file = std::fs::File::open(csv_path).map_err(|source| DatasetError::Io {
        path: csv_path.to_path_buf(),
        source,
    })?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);

    let csv_err = |source: csv::Error| DatasetError::Csv {
        path: csv_path.to_path_buf(),
        source,
    };

    let headers = unique_headers(rdr.headers().map_err(csv_err)?);
    let idx = ColumnIndices::resolve(&headers)?;

    let mut records = Vec::new();
    let mut skipped_rows = 0;
    for (row_index, result) in rdr.records().enumerate() {
        let row = result.map_err(csv_err)?;
        // +2: one for the header, one for 1-based line numbers
        let line = row_index + 2;

        if row.len() != headers.len() {
            warn!(
                line,
                expected = headers.len(),
                found = row.len(),
                "skipping dataset row with wrong field count"
            );
            skipped_rows += 1;
            continue;
        }

        let macros = (
            parse_grams(&row[idx.protein]),
            parse_grams(&row[idx.carbs]),
            parse_grams(&row[idx.fat]),
        );
        let (Some(protein_g), Some(carbs_g), Some(fat_g)) = macros else {
            warn!(line, "skipping dataset row with invalid macronutrient values");
            skipped_rows += 1;
            continue;
        };

        let columns: Map<String, Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(h, cell)| (h.clone(), cell_to_json(cell)))
            .collect();

        records.push(RecipeRecord {
            name: row[idx.name].to_string(),
            diet_type: row[idx.diet_type].to_string(),
            protein_g,
            carbs_g,
            fat_g,
            columns,
        });
    }

    if records.is_empty() {
        return Err(DatasetError::Empty(csv_path.to_path_buf()));
    }

    debug!(
        path = %csv_path.display(),
        rows = records.len(),
        skipped_rows,
        "dataset loaded"
    );

    Ok(Dataset {
        records,
        skipped_rows,
    })
}
