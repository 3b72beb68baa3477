use serde::Deserialize;

/// Specifies which store implementation to use
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StoreKind {
    Postgres,
    #[serde(other)]
    #[default]
    Memory,
}

/// Configuration for the persistence layer
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Store type: "postgres" or "memory" (default)
    #[serde(default)]
    pub store: StoreKind,

    /// Postgres connection string
    #[serde(default)]
    pub url: String,

    /// Maximum number of pooled connections (default: 4)
    #[serde(default = "default_pool")]
    pub pool: usize,
}

fn default_pool() -> usize {
    4
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            store: StoreKind::default(),
            url: String::new(),
            pool: default_pool(),
        }
    }
}
