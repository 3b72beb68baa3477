use super::AuthError;
use serde::{Deserialize, Serialize};

/// Decoded payload of a validated bearer credential.
///
/// `permissions` stays `None` when the claim is absent altogether, so a
/// misconfigured issuer (no RBAC claims at all) is distinguishable from a
/// caller that simply lacks a permission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// Require a named permission to be present in the granted set.
    ///
    /// Absence of an error is the success signal; insertion order of the
    /// granted set is irrelevant.
    pub fn require_permission(&self, permission: &str) -> Result<(), AuthError> {
        let granted = self
            .permissions
            .as_ref()
            .ok_or(AuthError::MissingPermissions)?;
        if granted.iter().any(|p| p == permission) {
            Ok(())
        } else {
            Err(AuthError::Forbidden(permission.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(permissions: Option<Vec<&str>>) -> Claims {
        Claims {
            iss: "https://barkeep.test/".to_string(),
            sub: "auth0|tester".to_string(),
            aud: "drinks".to_string(),
            exp: 4102444800, // far future
            permissions: permissions.map(|p| p.into_iter().map(String::from).collect()),
        }
    }

    #[test]
    fn test_granted_permission_passes() {
        let claims = claims(Some(vec!["get:drinks-detail", "post:drinks"]));
        assert!(claims.require_permission("post:drinks").is_ok());
    }

    #[test]
    fn test_lacking_permission_is_forbidden() {
        let claims = claims(Some(vec!["get:drinks-detail"]));
        assert!(matches!(
            claims.require_permission("delete:drinks"),
            Err(AuthError::Forbidden(_))
        ));
    }

    #[test]
    fn test_absent_claim_is_distinguished() {
        let claims = claims(None);
        assert!(matches!(
            claims.require_permission("get:drinks-detail"),
            Err(AuthError::MissingPermissions)
        ));
    }

    #[test]
    fn test_empty_claim_is_forbidden_not_missing() {
        let claims = claims(Some(vec![]));
        assert!(matches!(
            claims.require_permission("get:drinks-detail"),
            Err(AuthError::Forbidden(_))
        ));
    }
}
