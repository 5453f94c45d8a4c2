//! Kulture Store - Backends for the cultural record port
//!
//! Two adapters implement [`CultureStore`]: an immutable in-memory dataset
//! (the static variant) and a PostgreSQL-backed catalog.

pub mod fixture;
pub mod memory;
pub mod postgres;

pub use fixture::{StaticDataset, StaticRecord, StaticRecords, StaticRegion};
pub use memory::MemoryCultureStore;
pub use postgres::{PostgresConfig, PostgresStore};

use kulture_core::config::{BackendKind, LayeredConfig};
use kulture_core::error::{KultureError, Result};
use kulture_core::ports::CultureStore;
use std::sync::Arc;

/// Open the backend selected by `config`
pub async fn open_backend(config: &LayeredConfig) -> Result<Arc<dyn CultureStore>> {
    match config.backend.value {
        BackendKind::Static => {
            let dataset = match &config.fixture.value {
                Some(path) => StaticDataset::from_file(path)?,
                None => StaticDataset::builtin()?,
            };
            let store = MemoryCultureStore::from_dataset(dataset)?;
            tracing::info!(regions = store.region_count(), "Opened static backend");
            Ok(Arc::new(store))
        }
        BackendKind::Postgres => {
            let url = config.require_database_url()?;
            let pg_config = PostgresConfig::new(url.to_string()).map_err(|e| {
                KultureError::ConfigInvalid {
                    key: "database_url".to_string(),
                    reason: e.to_string(),
                }
            })?;
            let store = PostgresStore::new(pg_config).await?;
            tracing::info!("Opened postgres backend");
            Ok(Arc::new(store))
        }
    }
}
