use serde::Serialize;
use serde_json::{Map, Value};

use crate::dataset::RecipeRecord;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 50;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("page must be at least 1, got {0}")]
    InvalidPage(i64),
    #[error("per_page must be at least 1, got {0}")]
    InvalidPerPage(i64),
}

/// One page of raw rows, with the paging parameters echoed back.
#[derive(Debug, Serialize, Clone)]
pub struct Page<'a> {
    pub page: i64,
    pub per_page: i64,
    pub total_records: usize,
    pub total_pages: usize,
    pub data: Vec<&'a Map<String, Value>>,
}

/// Slices out 1-based page `page` of `per_page` rows.
///
/// Pages past the end are empty rather than an error.
pub fn paginate(records: &[RecipeRecord], page: i64, per_page: i64) -> Result<Page<'_>, PaginationError> {
    if per_page < 1 {
        return Err(PaginationError::InvalidPerPage(per_page));
    }
    if page < 1 {
        return Err(PaginationError::InvalidPage(page));
    }

    let total_records = records.len();
    // Both values are positive here; saturate instead of overflowing on huge inputs.
    let size = usize::try_from(per_page).unwrap_or(usize::MAX);
    let index = usize::try_from(page - 1).unwrap_or(usize::MAX);
    let total_pages = total_records.div_ceil(size);

    let start = index.saturating_mul(size).min(total_records);
    let end = start.saturating_add(size).min(total_records);

    Ok(Page {
        page,
        per_page,
        total_records,
        total_pages,
        data: records[start..end].iter().map(|r| &r.columns).collect(),
    })
}
