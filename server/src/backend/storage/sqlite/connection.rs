use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

use super::repositories::{
    ChoreLogRepository, ChoreRepository, FertilizerRepository, PlantRepository,
};
use crate::backend::storage::traits::Connection;

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and set up the schema
    pub async fn new(url: &str) -> Result<Self> {
        info!("Connecting to database at {}", url);
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database URL: {}", url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::from_pool(pool).await
    }

    /// Fresh in-memory database.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        Self::setup_schema(&pool).await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        debug!("Ensuring database schema");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS plants (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                planted_at TEXT NOT NULL,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS fertilizers (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                fertilizer_type TEXT NOT NULL CHECK (fertilizer_type IN ('liquid', 'granules')),
                is_organic INTEGER NOT NULL DEFAULT 0,
                notes TEXT,
                nitrogen REAL,
                phosphorus REAL,
                potassium REAL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chores (
                id TEXT PRIMARY KEY,
                plant_id TEXT NOT NULL REFERENCES plants(id) ON DELETE CASCADE,
                description TEXT,
                fertilizer_id TEXT REFERENCES fertilizers(id) ON DELETE SET NULL,
                fertilizer_amount TEXT,
                recur_amount INTEGER,
                recur_unit TEXT CHECK (recur_unit IN ('day', 'week')),
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chore_logs (
                id TEXT PRIMARY KEY,
                chore_id TEXT NOT NULL REFERENCES chores(id) ON DELETE CASCADE,
                fertilizer_amount TEXT,
                done_at TEXT NOT NULL,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_chores_plant_id ON chores(plant_id)")
            .execute(pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_chores_fertilizer_id ON chores(fertilizer_id)")
            .execute(pool)
            .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_chore_logs_chore_id_done_at ON chore_logs(chore_id, done_at)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl Connection for DbConnection {
    type PlantRepository = PlantRepository;
    type FertilizerRepository = FertilizerRepository;
    type ChoreRepository = ChoreRepository;
    type ChoreLogRepository = ChoreLogRepository;

    fn create_plant_repository(&self) -> Self::PlantRepository {
        PlantRepository::new(self.clone())
    }

    fn create_fertilizer_repository(&self) -> Self::FertilizerRepository {
        FertilizerRepository::new(self.clone())
    }

    fn create_chore_repository(&self) -> Self::ChoreRepository {
        ChoreRepository::new(self.clone())
    }

    fn create_chore_log_repository(&self) -> Self::ChoreLogRepository {
        ChoreLogRepository::new(self.clone())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(self.pool()).await?;
        Ok(())
    }
}
