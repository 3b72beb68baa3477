use axum::response::IntoResponse;
use axum::Json;
use http::StatusCode;
use serde_json::json;

/// HTTP-facing error carrying the status code and a human-readable message.
///
/// Every failure leaving this service, whatever its source, renders as the
/// same three-field envelope: `{"success": false, "error": <status>,
/// "message": <string>}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
}

impl ApiError {
    /// Create a new ApiError with a message and status code
    pub fn new<S: ToString>(message: S, status_code: StatusCode) -> Self {
        Self {
            message: message.to_string(),
            status_code,
        }
    }

    /// Create new Not Found (404) with a message
    pub fn not_found<S: ToString>(message: S) -> Self {
        Self::new(message, StatusCode::NOT_FOUND)
    }

    /// Create new Bad Request (400) with a message
    pub fn bad_request<S: ToString>(message: S) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST)
    }

    /// Create new Unauthorized (401) with a message
    #[allow(dead_code)]
    pub fn unauthorized<S: ToString>(message: S) -> Self {
        Self::new(message, StatusCode::UNAUTHORIZED)
    }

    /// Create new Unprocessable Entity (422) with a message
    ///
    /// Reserved: no handler currently classifies a failure this way.
    #[allow(dead_code)]
    pub fn unprocessable<S: ToString>(message: S) -> Self {
        Self::new(message, StatusCode::UNPROCESSABLE_ENTITY)
    }

    /// Create new Internal Server Error (500) with a message
    pub fn internal<S: ToString>(message: S) -> Self {
        Self::new(message, StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code;
        let body = json!({
            "success": false,
            "error": status_code.as_u16(),
            "message": self.message,
        });
        (status_code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();
        (status, serde_json::from_slice(&bytes).expect("JSON body"))
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let (status, json) = body_json(ApiError::not_found("resource not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], 404);
        assert_eq!(json["message"], "resource not found");
    }

    #[tokio::test]
    async fn test_internal_envelope() {
        let (status, json) = body_json(ApiError::internal("something broke")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], 500);
    }
}
