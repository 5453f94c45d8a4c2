//! PostgreSQL storage adapter implementation

pub mod catalog;
pub mod config;
pub mod migrations;

pub use catalog::{category_insert_sql, category_select_sql, ImportSummary};
pub use config::{ConfigError, MigrationConfig, PoolConfig, PostgresConfig};
pub use migrations::{MigrationError, MigrationManager, MigrationStatus};

use kulture_core::error::{KultureError, Result};
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};

/// PostgreSQL storage adapter
pub struct PostgresStore {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given configuration
    pub async fn new(config: PostgresConfig) -> Result<Self> {
        config.validate().map_err(|e| KultureError::ConfigInvalid {
            key: "database_url".to_string(),
            reason: e.to_string(),
        })?;

        let pool = PgPoolOptions::new()
            .min_connections(config.pool.min_connections)
            .max_connections(config.pool.max_connections)
            .acquire_timeout(config.pool.acquire_timeout)
            .idle_timeout(config.pool.idle_timeout)
            .max_lifetime(config.pool.max_lifetime)
            .connect(&config.database_url)
            .await
            .map_err(|e| {
                KultureError::source_unavailable(format!("Failed to connect to database: {}", e))
            })?;

        let store = Self { pool, config };
        store.health_check().await?;

        if store.config.migrations.auto_run {
            store.run_migrations().await?;
        }

        Ok(store)
    }

    /// Create a new PostgreSQL store and run migrations
    pub async fn with_migrations(config: PostgresConfig) -> Result<Self> {
        let store = Self::new(config).await?;
        store.run_migrations().await?;
        Ok(store)
    }

    /// Run all pending migrations
    pub async fn run_migrations(&self) -> Result<()> {
        let manager = MigrationManager::new(self.pool.clone());
        manager
            .run_migrations()
            .await
            .map_err(|e| KultureError::Storage {
                reason: format!("Migration failed: {}", e),
            })?;
        Ok(())
    }

    /// Check migration status
    pub async fn migration_status(&self) -> Result<Vec<MigrationStatus>> {
        let manager = MigrationManager::new(self.pool.clone());
        manager.check_status().await.map_err(|e| KultureError::Storage {
            reason: format!("Failed to check migration status: {}", e),
        })
    }

    /// Get the current schema version
    pub async fn current_version(&self) -> Result<Option<i64>> {
        let manager = MigrationManager::new(self.pool.clone());
        manager.current_version().await.map_err(|e| KultureError::Storage {
            reason: format!("Failed to get current version: {}", e),
        })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &PostgresConfig {
        &self.config
    }

    /// Perform a health check on the database connection
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| KultureError::source_unavailable(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Check out a dedicated connection for one logical operation.
    ///
    /// Returned to the pool when dropped, on success and failure alike.
    async fn connection(&self) -> Result<PoolConnection<Postgres>> {
        self.pool.acquire().await.map_err(map_sqlx_error)
    }
}

/// Classify a driver error into the port's error taxonomy.
///
/// Connectivity problems are `SourceUnavailable`; anything the server
/// answered with is a per-query `Storage` failure.
pub fn map_sqlx_error(err: sqlx::Error) -> KultureError {
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => KultureError::source_unavailable(err.to_string()),
        other => KultureError::Storage {
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_source_unavailable() {
        assert!(map_sqlx_error(sqlx::Error::PoolTimedOut).is_source_unavailable());
        assert!(map_sqlx_error(sqlx::Error::PoolClosed).is_source_unavailable());

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(map_sqlx_error(sqlx::Error::Io(io)).is_source_unavailable());
    }

    #[test]
    fn test_query_errors_are_storage() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, KultureError::Storage { .. }));

        let err = map_sqlx_error(sqlx::Error::ColumnNotFound("dish_name".to_string()));
        assert!(matches!(err, KultureError::Storage { .. }));
    }
}
