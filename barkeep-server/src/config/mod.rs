pub(crate) use crate::config::database::StoreKind;
use crate::config::auth::AuthConfig;
use crate::config::database::DatabaseConfig;
use config::{Config as ConfigCrate, ConfigError};
use serde::Deserialize;

pub mod auth;
pub mod database;

/// Main configuration structure for the barkeep server
#[derive(Debug, Deserialize, Clone)]
pub struct BarkeepConfig {
    /// The port the server will listen to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Credential validation configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Persistence configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

fn default_port() -> u16 {
    8080
}

impl Default for BarkeepConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            auth: AuthConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl BarkeepConfig {
    /// Creates a new config instance from environment variables
    pub fn new() -> Result<Self, String> {
        ConfigCrate::builder()
            .add_source(
                config::Environment::with_prefix("BARKEEP")
                    .prefix_separator("_")
                    .separator("_")
                    .convert_case(config::Case::Snake),
            )
            .build()
            .map_err(|e: ConfigError| e.to_string())?
            .try_deserialize()
            .map_err(|e| e.to_string())
    }

    #[cfg(test)]
    pub fn for_test_with_mocks(jwks_mock: &wiremock::MockServer) -> Self {
        Self {
            port: 0, // Let the OS choose a port
            auth: AuthConfig {
                jwks: format!("{}/.well-known/jwks.json", jwks_mock.uri()),
                issuer: "https://barkeep.test/".to_string(),
                audience: "drinks".to_string(),
                ttl: 60,
                timeout: 5,
            },
            database: DatabaseConfig {
                store: StoreKind::Memory,
                url: String::new(),
                pool: 2,
            },
        }
    }
}
