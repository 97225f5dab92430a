//! PostgreSQL persistence for categories, guidelines, tips and recycling locations

mod categories;
mod guidelines;
mod locations;
mod tips;

pub use locations::{LocationSort, SortDirection, SORTABLE_COLUMNS};

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseSettings;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    IllegalOperation(String),
}

impl PostgresError {
    /// Turn a unique-constraint violation into [`PostgresError::Conflict`]
    fn conflict_on_unique(err: sqlx::Error, message: impl FnOnce() -> String) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return PostgresError::Conflict(message());
            }
        }
        PostgresError::SqlxError(err)
    }
}

/// PostgreSQL client backing the waste management store
///
/// Reference data (categories, guidelines, tips) is managed through CRUD
/// operations. Recycling locations are read-only here; the search engine
/// works over the full set loaded by [`PostgresClient::all_locations`].
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, PostgresError> {
        let max_connections = settings.max_connections.unwrap_or(10);
        let min_connections = settings.min_connections.unwrap_or(1);

        tracing::info!(
            "Connecting to PostgreSQL (max: {}, min: {} connections)",
            max_connections,
            min_connections
        );

        Self::new(
            &settings.url,
            max_connections,
            min_connections,
            Duration::from_secs(settings.acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(settings.idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Wrap an existing pool without running migrations
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_unique_errors_pass_through() {
        let err = PostgresError::conflict_on_unique(sqlx::Error::RowNotFound, || {
            "duplicate".to_string()
        });
        assert!(matches!(err, PostgresError::SqlxError(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_error_messages() {
        let err = PostgresError::NotFound("Category not found with id: 3".to_string());
        assert_eq!(err.to_string(), "Category not found with id: 3");
    }
}
