use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::statement::Statement;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Table not allowed: {0}")]
    TableNotAllowed(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Handle to the SQLite store. Cloning shares the underlying pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the pool described by `config` and verify it answers.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;

        let db = Self { pool };
        db.health_check().await?;

        info!("Connected to database: {}", config.url);
        Ok(db)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Start a parameterized statement; bind arguments in placeholder order.
    pub fn prepare(&self, sql: impl Into<String>) -> Statement<'_> {
        Statement::new(&self.pool, sql.into())
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
