use super::claims::Claims;
use super::AuthError;
use crate::config::auth::AuthConfig;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use log::{debug, warn};
use moka::future::Cache as MokaCache;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Validates bearer credentials against the issuer's published key set.
///
/// The key set is fetched over HTTP and cached in-process with a TTL. A
/// token referencing an unknown `kid` triggers a single cache refresh
/// before being rejected, so key rotation at the issuer is picked up
/// without waiting for the TTL.
pub struct TokenValidator {
    http: Client,
    jwks_url: String,
    issuer: String,
    audience: String,
    keys: MokaCache<String, Arc<JwkSet>>,
}

impl TokenValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .connect_timeout(Duration::from_secs(2))
            .build()
            .expect("Failed to create key set client");

        let keys = MokaCache::builder()
            .time_to_live(Duration::from_secs(config.ttl))
            .max_capacity(2)
            .build();

        Self {
            http,
            jwks_url: config.jwks.clone(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            keys,
        }
    }

    /// Verify a raw bearer token: signature, expiry, audience and issuer.
    /// Returns the decoded payload on success.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|e| {
            debug!("Undecodable token header: {}", e);
            AuthError::InvalidToken
        })?;
        let kid = header.kid.ok_or(AuthError::InvalidToken)?;

        let jwk = match self.key_set().await?.find(&kid) {
            Some(jwk) => jwk.clone(),
            None => {
                // The issuer may have rotated its keys; refresh once.
                debug!("Signing key {} not cached, refreshing key set", kid);
                self.keys.invalidate(&self.jwks_url).await;
                self.key_set()
                    .await?
                    .find(&kid)
                    .ok_or(AuthError::UnknownKey)?
                    .clone()
            }
        };

        let key = DecodingKey::from_jwk(&jwk)
            .map_err(|e| AuthError::KeySet(format!("unsupported signing key: {}", e)))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&[self.issuer.as_str()]);

        let data = decode::<Claims>(token, &key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => AuthError::IncorrectClaims,
                _ => {
                    debug!("Token rejected: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        Ok(data.claims)
    }

    /// Resolve the issuer's key set, from cache or by fetching it
    async fn key_set(&self) -> Result<Arc<JwkSet>, AuthError> {
        self.keys
            .try_get_with(self.jwks_url.clone(), self.fetch_key_set())
            .await
            .map_err(|e: Arc<AuthError>| match e.as_ref() {
                AuthError::KeySet(message) => AuthError::KeySet(message.clone()),
                other => AuthError::KeySet(other.to_string()),
            })
    }

    async fn fetch_key_set(&self) -> Result<Arc<JwkSet>, AuthError> {
        debug!("Fetching signing key set from {}", self.jwks_url);
        let response = self.http.get(&self.jwks_url).send().await.map_err(|e| {
            warn!("Key set fetch failed: {}", e);
            AuthError::KeySet(format!("fetch failed: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(AuthError::KeySet(format!(
                "key set endpoint returned {}",
                response.status()
            )));
        }

        let jwks: JwkSet = response
            .json()
            .await
            .map_err(|e| AuthError::KeySet(format!("malformed key set: {}", e)))?;
        Ok(Arc::new(jwks))
    }
}
