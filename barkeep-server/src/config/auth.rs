use serde::Deserialize;

/// Configuration for bearer credential validation
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// URL of the identity provider's signing-key set (JWKS document)
    #[serde(default)]
    pub jwks: String,

    /// Expected `iss` claim of incoming tokens
    #[serde(default)]
    pub issuer: String,

    /// Expected `aud` claim of incoming tokens
    #[serde(default)]
    pub audience: String,

    /// How long a fetched key set stays cached, in seconds (default: 3600)
    #[serde(default = "default_ttl")]
    pub ttl: u64,

    /// Timeout for key-set fetches, in seconds (default: 5)
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_ttl() -> u64 {
    3600
}

fn default_timeout() -> u64 {
    5
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwks: String::new(),
            issuer: String::new(),
            audience: String::new(),
            ttl: default_ttl(),
            timeout: default_timeout(),
        }
    }
}
