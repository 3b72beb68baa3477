use crate::auth::TokenValidator;
use crate::config::BarkeepConfig;
use crate::store::{create_store, DrinkStore, Store, StoreError};
use std::sync::Arc;

/// Application context constructed once at startup and shared by reference
/// with the routing layer and every handler. Holds the persistence handle
/// and the token validator with its cached signing-key set.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BarkeepConfig>,
    pub store: Arc<Store>,
    pub validator: Arc<TokenValidator>,
}

impl AppState {
    pub async fn new(config: BarkeepConfig) -> Result<Self, StoreError> {
        let store = create_store(&config).await?;
        let validator = TokenValidator::new(&config.auth);
        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(store),
            validator: Arc::new(validator),
        })
    }

    /// Check if all components are healthy
    pub async fn health_check(&self) -> Result<(), String> {
        self.store.health_check().await
    }

    #[cfg(test)]
    pub fn for_testing(config: &BarkeepConfig) -> Self {
        use crate::store::memory::MemoryStore;

        Self {
            config: Arc::new(config.clone()),
            store: Arc::new(Store::Memory(MemoryStore::new())),
            validator: Arc::new(TokenValidator::new(&config.auth)),
        }
    }
}
