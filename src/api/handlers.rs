use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::error::{ApiError, ApiResult};
use crate::analysis::{
    cluster_diet_types, paginate, recipe_statistics, summarize_by_diet, top_protein,
    ClusterReport, DietAggregate, Page, ProteinPick, RecipeStatistics, DEFAULT_PAGE,
    DEFAULT_PER_PAGE, DEFAULT_TOP_PROTEIN_LIMIT,
};
use crate::dataset::DatasetSource;

const STATUS_SUCCESS: &str = "success";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<DatasetSource>,
}

#[derive(Debug, Deserialize)]
pub struct TopProteinQuery {
    limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RecipeFilterQuery {
    diet_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<i64>,
    per_page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    status: &'static str,
    total_records: usize,
    diet_types: usize,
    data: Vec<DietAggregate>,
}

#[derive(Debug, Serialize)]
pub struct TopProteinResponse {
    status: &'static str,
    count: usize,
    data: Vec<ProteinPick>,
}

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    status: &'static str,
    statistics: RecipeStatistics,
}

#[derive(Debug, Serialize)]
pub struct ClustersResponse {
    status: &'static str,
    #[serde(flatten)]
    clusters: ClusterReport,
}

#[derive(Debug, Serialize)]
struct PageResponse<'a> {
    status: &'static str,
    #[serde(flatten)]
    page: Page<'a>,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Nutritional Insights API is running",
    })
}

pub async fn nutrition_summary(State(state): State<AppState>) -> ApiResult<SummaryResponse> {
    let dataset = state.source.snapshot().await?;
    let data = summarize_by_diet(&dataset.records);

    Ok(Json(SummaryResponse {
        status: STATUS_SUCCESS,
        total_records: dataset.len(),
        diet_types: data.len(),
        data,
    }))
}

pub async fn top_protein_recipes(
    State(state): State<AppState>,
    query: Result<Query<TopProteinQuery>, QueryRejection>,
) -> ApiResult<TopProteinResponse> {
    let Query(params) = query?;
    let limit = params.limit.unwrap_or(DEFAULT_TOP_PROTEIN_LIMIT);

    let dataset = state.source.snapshot().await?;
    let data = top_protein(&dataset.records, limit);
    debug!(limit, selected = data.len(), "top protein recipes");

    Ok(Json(TopProteinResponse {
        status: STATUS_SUCCESS,
        count: data.len(),
        data,
    }))
}

pub async fn recipe_stats(
    State(state): State<AppState>,
    query: Result<Query<RecipeFilterQuery>, QueryRejection>,
) -> ApiResult<StatisticsResponse> {
    let Query(params) = query?;

    let dataset = state.source.snapshot().await?;
    let statistics = recipe_statistics(&dataset.records, params.diet_type.as_deref());
    if !statistics.has_matches() {
        debug!(diet_type = ?params.diet_type, "no recipes matched filter");
    }

    Ok(Json(StatisticsResponse {
        status: STATUS_SUCCESS,
        statistics,
    }))
}

pub async fn diet_clusters(State(state): State<AppState>) -> ApiResult<ClustersResponse> {
    let dataset = state.source.snapshot().await?;
    let summary = summarize_by_diet(&dataset.records);

    Ok(Json(ClustersResponse {
        status: STATUS_SUCCESS,
        clusters: cluster_diet_types(&summary),
    }))
}

pub async fn all_nutrition_data(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query?;
    let page = params.page.unwrap_or(DEFAULT_PAGE);
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE);

    let dataset = state.source.snapshot().await?;
    let page = paginate(&dataset.records, page, per_page)?;

    // Rows borrow from the snapshot, so serialize while it is still alive.
    Ok(Json(PageResponse {
        status: STATUS_SUCCESS,
        page,
    })
    .into_response())
}
