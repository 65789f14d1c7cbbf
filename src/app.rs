//! Router assembly: API routes, CORS, request tracing and the static fallback

use anyhow::{Context, Result};
use axum::{http::HeaderValue, routing::{any, get}, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::handlers;
use crate::routes;
use crate::state::AppState;

/// Build the full service router for the given state
///
/// Paths under `/api` resolve to content or a JSON 404. Everything else is
/// served from the static directory, falling back to its `index.html` so the
/// client can handle deep links itself.
pub fn create_router(state: AppState) -> Result<Router> {
    let cors = cors_layer(&state.config)?;

    let static_dir = &state.config.static_dir;
    let static_files = ServeDir::new(static_dir)
        .fallback(ServeFile::new(static_dir.join("index.html")));

    let router = Router::new()
        .route(routes::HEALTH, get(handlers::health_handler))
        .route(routes::OPENAPI_JSON, get(handlers::openapi_handler))
        .route(routes::CONTENT_ITEM, get(handlers::content_handler))
        .route(routes::API_ROOT, any(handlers::api_not_found_handler))
        .route(routes::API_ROOT_SLASH, any(handlers::api_not_found_handler))
        .route(routes::API_NESTED, any(handlers::api_not_found_handler))
        .fallback_service(static_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}

fn cors_layer(config: &Config) -> Result<CorsLayer> {
    match &config.cors_allowed_origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .context("CORS_ALLOWED_ORIGIN is not a valid header value")?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any))
        }
        None => Ok(CorsLayer::permissive()),
    }
}
