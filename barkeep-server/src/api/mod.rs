pub(crate) mod drinks;
pub(crate) mod health;

use crate::errors::ApiError;
use crate::state::AppState;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

/// Combines all API routes into a single router
pub(super) fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(drinks::router(state))
        .fallback(fallback)
        .layer(cors_layer())
}

/// Unmatched requests still get the uniform error envelope
async fn fallback() -> ApiError {
    ApiError::not_found("resource not found")
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
