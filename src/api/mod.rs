//! HTTP surface of the service.
//!
//! Every route lives under `/api`, answers `GET` with JSON, and accepts
//! cross-origin requests from anywhere.

pub mod error;
pub mod handlers;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::dataset::DatasetSource;
pub use error::{ApiError, ApiResult};
pub use handlers::AppState;

/// Build the API router over a dataset source.
pub fn build_router(source: Arc<DatasetSource>) -> Router {
    let state = AppState { source };

    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/nutrition/summary", get(handlers::nutrition_summary))
        .route("/api/nutrition/all", get(handlers::all_nutrition_data))
        .route("/api/recipes", get(handlers::recipe_stats))
        .route("/api/recipes/top-protein", get(handlers::top_protein_recipes))
        .route("/api/clusters", get(handlers::diet_clusters))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
