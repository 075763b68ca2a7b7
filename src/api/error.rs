use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::analysis::PaginationError;
use crate::dataset::DatasetError;

/// Errors a handler can hand back to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("dataset unavailable: {0}")]
    DataUnavailable(#[from] DatasetError),
    #[error("Invalid query parameters: {0}")]
    InvalidQuery(String),
    #[error(transparent)]
    InvalidPagination(#[from] PaginationError),
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DataUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidQuery(_) | ApiError::InvalidPagination(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::DataUnavailable(cause) => {
                error!("Failed to load dataset: {}", cause);
                "Failed to load data".to_string()
            }
            other => {
                warn!("Rejected request: {}", other);
                other.to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;
