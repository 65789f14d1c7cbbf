use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse};
use crate::handlers;
use crate::models::ContentRecord;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "rust-page-content API",
        version = "1.0.0",
        description = "Fixed page content served by identifier"
    ),
    paths(
        handlers::health::health_handler,
        handlers::content::content_handler
    ),
    components(
        schemas(
            ContentRecord,
            ErrorResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "content", description = "Page content operations")
    )
)]
pub struct ApiDoc;
