pub(crate) mod claims;
pub(crate) mod validator;

pub(crate) use claims::Claims;
pub(crate) use validator::TokenValidator;

use crate::state::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::{HeaderMap, StatusCode};
use log::{debug, warn};
use serde_json::json;
use thiserror::Error;

/// Permission strings required by the drinks endpoints, one per route
pub(crate) mod permissions {
    pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
    pub const POST_DRINKS: &str = "post:drinks";
    pub const PATCH_DRINKS: &str = "patch:drinks";
    pub const DELETE_DRINKS: &str = "delete:drinks";
}

/// Failures of the authorization-check flow.
///
/// These are deliberately not handled inside request handlers: they
/// propagate from the guard middleware straight into the uniform error
/// envelope, keeping the specific status and message of each kind.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is expected")]
    MissingHeader,
    #[error("Authorization header must be a bearer token")]
    InvalidHeader,
    #[error("Token expired")]
    TokenExpired,
    #[error("Incorrect claims, please check the audience and issuer")]
    IncorrectClaims,
    #[error("Unable to parse authentication token")]
    InvalidToken,
    #[error("Unable to find a signing key that matches the token")]
    UnknownKey,
    #[error("Failed to resolve the signing key set: {0}")]
    KeySet(String),
    #[error("Permissions claim is missing from the token")]
    MissingPermissions,
    #[error("Permission '{0}' is not granted")]
    Forbidden(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingHeader
            | Self::InvalidHeader
            | Self::TokenExpired
            | Self::IncorrectClaims
            | Self::UnknownKey => StatusCode::UNAUTHORIZED,
            Self::InvalidToken | Self::MissingPermissions => StatusCode::BAD_REQUEST,
            Self::KeySet(_) => StatusCode::BAD_GATEWAY,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let body = json!({
            "success": false,
            "error": status_code.as_u16(),
            "message": self.to_string(),
        });
        (status_code, Json(body)).into_response()
    }
}

/// Extract a single bearer token from the standard authorization header.
///
/// Rejects an absent header, a non-bearer scheme, a bare scheme with no
/// token, and any extra segments after the token.
pub(crate) fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;
    let value = header.to_str().map_err(|_| AuthError::InvalidHeader)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::InvalidHeader),
    }
}

/// Per-route authorization guard.
///
/// Applied at route registration time with
/// `middleware::from_fn_with_state((state, permission), permission_guard)`.
/// Validates the bearer credential, requires the named permission, and makes
/// the validated claims available to the handler through request extensions.
/// This is the only place permission enforcement occurs.
pub(crate) async fn permission_guard(
    State((state, permission)): State<(AppState, &'static str)>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer_token(request.headers())?;
    let claims = state.validator.verify(token).await?;
    claims.require_permission(permission).inspect_err(|_| {
        warn!(
            "Subject {} denied: missing permission {}",
            claims.sub, permission
        );
    })?;

    debug!("Subject {} granted {}", claims.sub, permission);
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_extracts_bearer_token() {
        let headers = headers_with("Bearer some.jwt.token");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "some.jwt.token");
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        let headers = headers_with("bearer some.jwt.token");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "some.jwt.token");
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AuthError::MissingHeader)
        ));
    }

    #[test]
    fn test_rejects_non_bearer_scheme() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AuthError::InvalidHeader)
        ));
    }

    #[test]
    fn test_rejects_missing_token() {
        let headers = headers_with("Bearer");
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AuthError::InvalidHeader)
        ));
    }

    #[test]
    fn test_rejects_extra_segments() {
        let headers = headers_with("Bearer one two");
        assert!(matches!(
            extract_bearer_token(&headers),
            Err(AuthError::InvalidHeader)
        ));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::MissingHeader.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::TokenExpired.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::MissingPermissions.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Forbidden("post:drinks".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
    }
}
