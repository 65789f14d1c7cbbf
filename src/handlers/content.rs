use crate::error::{ApiError, ErrorResponse};
use crate::models::ContentRecord;
use crate::routes;
use crate::state::AppState;
use axum::{extract::OriginalUri, extract::Path, extract::State, http::StatusCode, Json};

/// GET /api/{identifier} handler - Retrieve the content for one page
#[utoipa::path(
    get,
    path = routes::CONTENT_ITEM,
    params(
        ("identifier" = String, Path, description = "Page identifier, e.g. home, about or contact")
    ),
    responses(
        (status = 200, description = "Page content found", body = ContentRecord),
        (status = 404, description = "Unknown page identifier", body = ErrorResponse)
    ),
    tag = "content"
)]
pub async fn content_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<(StatusCode, Json<ContentRecord>), ApiError> {
    match state.catalog.get_content(&identifier) {
        Ok(record) => {
            tracing::info!("Served content for page: {}", identifier);
            Ok((StatusCode::OK, Json(record.clone())))
        }
        Err(e) => {
            tracing::warn!("Content lookup failed for '{}': {}", identifier, e);
            Err(e.into())
        }
    }
}

/// GET /api/, /api/{identifier}/... handler - paths under /api that name no page
///
/// Keeps unknown API paths from falling through to the client entry document.
pub async fn api_not_found_handler(OriginalUri(uri): OriginalUri) -> ApiError {
    tracing::debug!("No API route for {}", uri.path());
    ApiError::RouteNotFound(uri.path().to_string())
}
