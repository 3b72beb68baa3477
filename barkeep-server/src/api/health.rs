use crate::openapi::HEALTH_TAG;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use log::warn;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check handler
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is not healthy", body = HealthResponse)
    )
)]
pub(crate) async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                error: None,
            }),
        ),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "error",
                    error: Some(e),
                }),
            )
        }
    }
}

pub(super) fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestFixture;

    #[tokio::test]
    async fn test_health_endpoint() {
        let fixture = TestFixture::new().await;
        let response = fixture.get("/health").await;
        response.assert_ok();
        assert_eq!(response.json["status"], "ok");
    }
}
