use super::{DrinkStore, StoreError};
use crate::models::{Drink, Ingredient};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory store backed by an ordered map with monotonically increasing
/// ids. Used by the test fixture and for local runs without a database.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    next_id: i32,
    drinks: BTreeMap<i32, Drink>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DrinkStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.drinks.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Drink>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.drinks.get(&id).cloned())
    }

    async fn insert(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let drink = Drink {
            id: inner.next_id,
            title: title.to_string(),
            recipe: recipe.to_vec(),
        };
        inner.drinks.insert(drink.id, drink.clone());
        Ok(drink)
    }

    async fn update(
        &self,
        id: i32,
        title: &str,
        recipe: &[Ingredient],
    ) -> Result<Drink, StoreError> {
        let mut inner = self.inner.write().await;
        let drink = inner.drinks.get_mut(&id).ok_or(StoreError::NotFound)?;
        drink.title = title.to_string();
        drink.recipe = recipe.to_vec();
        Ok(drink.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.drinks.remove(&id).ok_or(StoreError::NotFound)?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), String> {
        Ok(())
    }
}
