//! Persistence gateway: restaurants table DDL and CRUD primitives.
//!
//! Handlers talk to a [`RestaurantStore`] trait object injected through
//! `AppState`, never to a global connection. [`MySqlStore`] is the
//! production implementation; [`MemoryStore`] backs tests and DB-less
//! local runs.

use crate::config::DbConfig;
use crate::error::AppError;
use crate::model::{NewRestaurant, Restaurant};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tokio::sync::Mutex;

/// CRUD primitives over the restaurants table. Reads exclude soft-deleted
/// rows; delete is a tombstone write, never a physical removal.
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// All non-deleted restaurants, ordered by id.
    async fn find_all(&self) -> Result<Vec<Restaurant>, AppError>;
    /// One restaurant by id; None when absent or soft-deleted.
    async fn find_by_id(&self, id: i64) -> Result<Option<Restaurant>, AppError>;
    /// Insert a new row; the store assigns id and timestamps.
    async fn create(&self, new: NewRestaurant) -> Result<Restaurant, AppError>;
    /// Overwrite the row with the record's id, refreshing `updated_at`.
    /// None when the id is absent or soft-deleted.
    async fn save(&self, restaurant: Restaurant) -> Result<Option<Restaurant>, AppError>;
    /// Soft-delete by id. Succeeds silently when the id does not exist.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;
    /// Connectivity probe for the readiness route.
    async fn ping(&self) -> Result<(), AppError>;
}

const SELECT_COLUMNS: &str = "id, name, location, cuisine, created_at, updated_at, deleted_at";

/// MySQL-backed store owning the process-wide connection pool.
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Open the pool from env-derived config and ensure the restaurants
    /// table exists. Any failure here is fatal at startup.
    pub async fn connect(config: &DbConfig) -> Result<Self, AppError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(5)
            .connect(&config.connection_url())
            .await?;
        let store = Self { pool };
        store.ensure_table().await?;
        tracing::info!(host = %config.host, database = %config.database, "connected to database");
        Ok(store)
    }

    /// Create the restaurants table if missing; leave it unchanged if present.
    async fn ensure_table(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS restaurants (
                id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(255) NOT NULL DEFAULT '',
                location VARCHAR(255) NOT NULL DEFAULT '',
                cuisine VARCHAR(255) NOT NULL DEFAULT '',
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
                deleted_at TIMESTAMP NULL DEFAULT NULL,
                INDEX idx_restaurants_deleted_at (deleted_at)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl RestaurantStore for MySqlStore {
    async fn find_all(&self) -> Result<Vec<Restaurant>, AppError> {
        let sql = format!(
            "SELECT {} FROM restaurants WHERE deleted_at IS NULL ORDER BY id",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, Restaurant>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Restaurant>, AppError> {
        let sql = format!(
            "SELECT {} FROM restaurants WHERE id = ? AND deleted_at IS NULL",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Restaurant>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, new: NewRestaurant) -> Result<Restaurant, AppError> {
        let result = sqlx::query("INSERT INTO restaurants (name, location, cuisine) VALUES (?, ?, ?)")
            .bind(&new.name)
            .bind(&new.location)
            .bind(&new.cuisine)
            .execute(&self.pool)
            .await?;
        let id = result.last_insert_id() as i64;
        tracing::debug!(id, "created restaurant");
        self.find_by_id(id)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn save(&self, restaurant: Restaurant) -> Result<Option<Restaurant>, AppError> {
        sqlx::query(
            "UPDATE restaurants SET name = ?, location = ?, cuisine = ?, \
             updated_at = CURRENT_TIMESTAMP WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(&restaurant.name)
        .bind(&restaurant.location)
        .bind(&restaurant.cuisine)
        .bind(restaurant.id)
        .execute(&self.pool)
        .await?;
        // Re-fetch so the caller sees the store-assigned updated_at.
        self.find_by_id(restaurant.id).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE restaurants SET deleted_at = CURRENT_TIMESTAMP \
             WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// In-process store with the same soft-delete semantics as [`MySqlStore`].
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

struct MemoryInner {
    rows: Vec<Restaurant>,
    next_id: i64,
}

impl Default for MemoryInner {
    fn default() -> Self {
        Self { rows: Vec::new(), next_id: 1 }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RestaurantStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Restaurant>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .rows
            .iter()
            .filter(|r| r.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Restaurant>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .rows
            .iter()
            .find(|r| r.id == id && r.deleted_at.is_none())
            .cloned())
    }

    async fn create(&self, new: NewRestaurant) -> Result<Restaurant, AppError> {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();
        let restaurant = Restaurant {
            id: inner.next_id,
            name: new.name,
            location: new.location,
            cuisine: new.cuisine,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        inner.next_id += 1;
        inner.rows.push(restaurant.clone());
        Ok(restaurant)
    }

    async fn save(&self, restaurant: Restaurant) -> Result<Option<Restaurant>, AppError> {
        let mut inner = self.inner.lock().await;
        let Some(row) = inner
            .rows
            .iter_mut()
            .find(|r| r.id == restaurant.id && r.deleted_at.is_none())
        else {
            return Ok(None);
        };
        row.name = restaurant.name;
        row.location = restaurant.location;
        row.cuisine = restaurant.cuisine;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let mut inner = self.inner.lock().await;
        if let Some(row) = inner
            .rows
            .iter_mut()
            .find(|r| r.id == id && r.deleted_at.is_none())
        {
            row.deleted_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> NewRestaurant {
        NewRestaurant {
            name: name.into(),
            location: "Main St".into(),
            cuisine: "Italian".into(),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let a = store.create(draft("A")).await.unwrap();
        let b = store.create(draft("B")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn ids_are_never_reused_after_delete() {
        let store = MemoryStore::new();
        let a = store.create(draft("A")).await.unwrap();
        store.delete_by_id(a.id).await.unwrap();
        let b = store.create(draft("B")).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn soft_deleted_rows_are_hidden_from_reads() {
        let store = MemoryStore::new();
        let a = store.create(draft("A")).await.unwrap();
        store.delete_by_id(a.id).await.unwrap();
        assert!(store.find_by_id(a.id).await.unwrap().is_none());
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_of_absent_id_is_silent() {
        let store = MemoryStore::new();
        store.delete_by_id(999).await.unwrap();
    }

    #[tokio::test]
    async fn save_overwrites_fields_and_refreshes_updated_at() {
        let store = MemoryStore::new();
        let mut a = store.create(draft("A")).await.unwrap();
        a.cuisine = "Neapolitan".into();
        let saved = store.save(a.clone()).await.unwrap().unwrap();
        assert_eq!(saved.id, a.id);
        assert_eq!(saved.cuisine, "Neapolitan");
        assert!(saved.updated_at >= a.updated_at);
    }

    #[tokio::test]
    async fn save_on_absent_id_returns_none() {
        let store = MemoryStore::new();
        let missing = Restaurant {
            id: 42,
            name: String::new(),
            location: String::new(),
            cuisine: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };
        assert!(store.save(missing).await.unwrap().is_none());
    }
}
