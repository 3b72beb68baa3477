use super::{DrinkStore, StoreError};
use crate::models::{Drink, Ingredient};
use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use log::debug;
use tokio_postgres::{NoTls, Row};

// The schema is ensured idempotently at startup; migrations are out of
// scope. Recipes live in a JSONB column, one document per drink.
const SETUP_SQL: &str = "CREATE TABLE IF NOT EXISTS drinks (
    id SERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    recipe JSONB NOT NULL
)";

const LIST_SQL: &str = "SELECT id, title, recipe FROM drinks ORDER BY id";
const GET_SQL: &str = "SELECT id, title, recipe FROM drinks WHERE id = $1";
const INSERT_SQL: &str =
    "INSERT INTO drinks (title, recipe) VALUES ($1, $2) RETURNING id, title, recipe";
const UPDATE_SQL: &str =
    "UPDATE drinks SET title = $2, recipe = $3 WHERE id = $1 RETURNING id, title, recipe";
const DELETE_SQL: &str = "DELETE FROM drinks WHERE id = $1";

/// Postgres-backed drink store with pooled connections
pub struct PostgresStore {
    pool: Pool,
}

impl PostgresStore {
    /// Connect to the database named by the connection string and ensure
    /// the schema exists
    pub async fn connect(url: &str, pool_size: usize) -> Result<Self, StoreError> {
        let pg_config: tokio_postgres::Config = url
            .parse()
            .map_err(|e| StoreError::Config(format!("invalid connection string: {}", e)))?;
        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );
        let pool = Pool::builder(manager)
            .max_size(pool_size)
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        debug!("Ensuring drinks schema");
        let client = self.pool.get().await?;
        client.batch_execute(SETUP_SQL).await?;
        Ok(())
    }
}

fn drink_from_row(row: &Row) -> Result<Drink, StoreError> {
    let recipe_json: serde_json::Value = row.try_get("recipe")?;
    let recipe: Vec<Ingredient> = serde_json::from_value(recipe_json)?;
    Ok(Drink {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        recipe,
    })
}

#[async_trait]
impl DrinkStore for PostgresStore {
    async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        let client = self.pool.get().await?;
        let rows = client.query(LIST_SQL, &[]).await?;
        rows.iter().map(drink_from_row).collect()
    }

    async fn get(&self, id: i32) -> Result<Option<Drink>, StoreError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(GET_SQL, &[&id]).await?;
        row.as_ref().map(drink_from_row).transpose()
    }

    async fn insert(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, StoreError> {
        let recipe_json = serde_json::to_value(recipe)?;
        let client = self.pool.get().await?;
        let row = client.query_one(INSERT_SQL, &[&title, &recipe_json]).await?;
        drink_from_row(&row)
    }

    async fn update(
        &self,
        id: i32,
        title: &str,
        recipe: &[Ingredient],
    ) -> Result<Drink, StoreError> {
        let recipe_json = serde_json::to_value(recipe)?;
        let client = self.pool.get().await?;
        // Update by primary key; zero rows means the drink does not exist.
        let row = client
            .query_opt(UPDATE_SQL, &[&id, &title, &recipe_json])
            .await?
            .ok_or(StoreError::NotFound)?;
        drink_from_row(&row)
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let client = self.pool.get().await?;
        let deleted = client.execute(DELETE_SQL, &[&id]).await?;
        if deleted == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), String> {
        let client = self.pool.get().await.map_err(|e| e.to_string())?;
        client
            .batch_execute("SELECT 1")
            .await
            .map_err(|e| e.to_string())
    }
}
