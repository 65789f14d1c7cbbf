use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::content::ContentError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub pages: usize,
    pub started_at: String,
}

/// Custom error type for API endpoints
///
/// Maps each failure to an HTTP status and a JSON `{"error": ...}` body, so a
/// bad identifier never yields anything shaped like a content record.
#[derive(Debug)]
pub enum ApiError {
    /// Identifier not in the content catalog
    PageNotFound(String),
    /// Empty identifier in path parameter
    InvalidIdentifier,
    /// Path under /api that matches no endpoint
    RouteNotFound(String),
    /// Catalog misconfiguration surfaced through a lookup
    CatalogError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::PageNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Page not found: {}", id),
            ),
            ApiError::InvalidIdentifier => (
                StatusCode::BAD_REQUEST,
                "Invalid identifier: must not be empty".to_string(),
            ),
            ApiError::RouteNotFound(path) => (
                StatusCode::NOT_FOUND,
                format!("No API route for {}", path),
            ),
            ApiError::CatalogError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Catalog error: {}", msg),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::NotFound(id) => ApiError::PageNotFound(id),
            ContentError::EmptyIdentifier => ApiError::InvalidIdentifier,
            err @ (ContentError::DuplicateIdentifier(_)
            | ContentError::EmptyField { .. }
            | ContentError::Empty) => ApiError::CatalogError(err.to_string()),
        }
    }
}
