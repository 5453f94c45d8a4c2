use anyhow::Result;
use kulture_core::config::LayeredConfig;
use kulture_core::RegionAggregator;
use kulture_store::postgres::{PostgresConfig, PostgresStore};
use std::sync::Arc;

use crate::errors;

/// Open the configured backend and wrap it in an aggregator
pub async fn open_aggregator(config: &LayeredConfig) -> Result<Arc<RegionAggregator>> {
    let store = kulture_store::open_backend(config)
        .await
        .map_err(errors::from_kulture)?;

    Ok(Arc::new(RegionAggregator::new(store, config.default_anchor.value)))
}

/// Connect to PostgreSQL for database management, regardless of the selected backend
pub async fn open_postgres(config: &LayeredConfig) -> Result<PostgresStore> {
    let url = config.require_database_url().map_err(errors::from_kulture)?;

    let pg_config = PostgresConfig::new(url.to_string())
        .map_err(|e| errors::invalid_config("database_url", &e.to_string()))?;

    PostgresStore::new(pg_config)
        .await
        .map_err(|e| errors::from_kulture(e).into())
}
