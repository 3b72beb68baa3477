use crate::config::{BarkeepConfig, StoreKind};
use crate::models::{Drink, Ingredient};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("drink not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(String),
    #[error("failed to encode recipe: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store configuration error: {0}")]
    Config(String),
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(e: tokio_postgres::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl From<deadpool_postgres::PoolError> for StoreError {
    fn from(e: deadpool_postgres::PoolError) -> Self {
        StoreError::Database(e.to_string())
    }
}

/// Store trait defining the interface for all persistence backends.
///
/// Implementations must be thread-safe (Send + Sync); the application holds
/// one store for its lifetime and shares it across request handlers.
#[async_trait]
pub trait DrinkStore: Send + Sync {
    /// All drinks, ordered by id
    async fn list(&self) -> Result<Vec<Drink>, StoreError>;

    /// A single drink by primary key, `None` when no row matches
    async fn get(&self, id: i32) -> Result<Option<Drink>, StoreError>;

    /// Insert a new drink and return it with its generated id
    async fn insert(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, StoreError>;

    /// Update a drink in place by primary key; `NotFound` when absent
    async fn update(&self, id: i32, title: &str, recipe: &[Ingredient])
        -> Result<Drink, StoreError>;

    /// Remove a drink by primary key; `NotFound` when absent
    async fn delete(&self, id: i32) -> Result<(), StoreError>;

    /// Check that the backend is reachable
    async fn health_check(&self) -> Result<(), String>;
}

/// Store implementation that provides a uniform interface regardless of
/// backend. The concrete implementation is chosen at startup from the
/// application configuration.
pub enum Store {
    /// Postgres-backed store, the production backend
    Postgres(postgres::PostgresStore),
    /// In-memory store for tests and local runs
    Memory(memory::MemoryStore),
}

#[async_trait]
impl DrinkStore for Store {
    async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        match self {
            Self::Postgres(store) => store.list().await,
            Self::Memory(store) => store.list().await,
        }
    }

    async fn get(&self, id: i32) -> Result<Option<Drink>, StoreError> {
        match self {
            Self::Postgres(store) => store.get(id).await,
            Self::Memory(store) => store.get(id).await,
        }
    }

    async fn insert(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, StoreError> {
        match self {
            Self::Postgres(store) => store.insert(title, recipe).await,
            Self::Memory(store) => store.insert(title, recipe).await,
        }
    }

    async fn update(
        &self,
        id: i32,
        title: &str,
        recipe: &[Ingredient],
    ) -> Result<Drink, StoreError> {
        match self {
            Self::Postgres(store) => store.update(id, title, recipe).await,
            Self::Memory(store) => store.update(id, title, recipe).await,
        }
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        match self {
            Self::Postgres(store) => store.delete(id).await,
            Self::Memory(store) => store.delete(id).await,
        }
    }

    async fn health_check(&self) -> Result<(), String> {
        match self {
            Self::Postgres(store) => store.health_check().await,
            Self::Memory(store) => store.health_check().await,
        }
    }
}

/// Create the appropriate store implementation based on configuration
pub async fn create_store(config: &BarkeepConfig) -> Result<Store, StoreError> {
    match config.database.store {
        StoreKind::Postgres => {
            if config.database.url.is_empty() {
                return Err(StoreError::Config(
                    "a connection string is required for the postgres store".to_string(),
                ));
            }
            let store =
                postgres::PostgresStore::connect(&config.database.url, config.database.pool)
                    .await?;
            Ok(Store::Postgres(store))
        }
        StoreKind::Memory => Ok(Store::Memory(memory::MemoryStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BarkeepConfig;

    #[tokio::test]
    async fn test_factory_rejects_postgres_without_url() {
        let mut config = BarkeepConfig::default();
        config.database.store = StoreKind::Postgres;
        config.database.url = String::new();

        assert!(matches!(
            create_store(&config).await,
            Err(StoreError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_factory_defaults_to_memory() {
        let config = BarkeepConfig::default();
        let store = create_store(&config).await.expect("create store");
        assert!(matches!(store, Store::Memory(_)));
        assert!(store.health_check().await.is_ok());
    }
}
