use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use giftbox_core::{DesignStore, SavedDesign, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::codec::DesignRow;

/// Connection strings that select a private in-memory database.
const MEMORY_URLS: [&str; 2] = [":memory:", "sqlite::memory:"];

/// [`DesignStore`] backed by a SQLite database.
pub struct SqliteDesignStore {
    pool: SqlitePool,
}

impl SqliteDesignStore {
    /// Opens `connection_string`, which is either a bare file path (created
    /// if missing), a `sqlite:` URL, or `:memory:`.
    ///
    /// Migrations are not run; call [`SqliteDesignStore::run_migrations`].
    pub async fn new(connection_string: &str) -> Result<Self> {
        let pool = if MEMORY_URLS.contains(&connection_string) {
            // Every connection to :memory: is its own database, so pin the
            // pool to one connection that never expires.
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
                .await
        } else {
            let options = if connection_string.starts_with("sqlite:") {
                SqliteConnectOptions::from_str(connection_string)
                    .with_context(|| format!("Invalid SQLite URL: {}", connection_string))?
            } else {
                SqliteConnectOptions::new().filename(connection_string)
            };
            SqlitePoolOptions::new()
                .connect_with(options.create_if_missing(true))
                .await
        }
        .with_context(|| format!("Failed to connect to database: {}", connection_string))?;

        debug!(connection_string, "sqlite design store connected");
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DesignStore for SqliteDesignStore {
    async fn load(&self) -> Result<Vec<SavedDesign>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, saved_at, schema_version, state_json
             FROM saved_designs
             ORDER BY position",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let designs = rows
            .iter()
            .map(|row| DesignRow::from_row(row).and_then(DesignRow::decode))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = designs.len(), "designs read from sqlite");
        Ok(designs)
    }

    /// Replaces every stored row with `designs` in a single transaction.
    async fn save(
        &self,
        designs: &[SavedDesign],
    ) -> Result<(), StoreError> {
        let rows = designs
            .iter()
            .map(DesignRow::encode)
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        sqlx::query("DELETE FROM saved_designs")
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        for (position, row) in rows.iter().enumerate() {
            sqlx::query(
                "INSERT INTO saved_designs (id, position, name, saved_at, schema_version, state_json)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&row.id)
            .bind(position as i64)
            .bind(&row.name)
            .bind(&row.saved_at)
            .bind(row.schema_version)
            .bind(&row.state_json)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to insert design {}: {}", row.id, e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        info!(count = rows.len(), "designs written to sqlite");
        Ok(())
    }
}
