//! In-memory backend for the static variant.
//!
//! The dataset is loaded once and never mutated, so reads need no locking.

use async_trait::async_trait;
use kulture_core::error::{KultureError, Result};
use kulture_core::models::{
    Category, CulturalRecord, DateRange, FestivalEvent, Region, RegionId,
};
use kulture_core::ports::CultureStore;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::fixture::StaticDataset;

/// Immutable in-memory implementation of [`CultureStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryCultureStore {
    regions: Arc<Vec<Region>>,
    records: Arc<HashMap<(RegionId, Category), Vec<CulturalRecord>>>,
}

impl MemoryCultureStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a dataset, rejecting duplicate region names
    pub fn from_dataset(dataset: StaticDataset) -> Result<Self> {
        let mut regions = Vec::with_capacity(dataset.regions.len());
        let mut records = HashMap::new();
        let mut seen_names = HashSet::new();
        let mut seen_ids = HashSet::new();

        for static_region in &dataset.regions {
            let region = static_region.to_region();

            if !seen_names.insert(region.name.to_lowercase()) || !seen_ids.insert(region.id.clone())
            {
                return Err(KultureError::ConfigInvalid {
                    key: "fixture".to_string(),
                    reason: format!("Duplicate region: {}", region.name),
                });
            }

            for category in Category::ALL {
                let converted: Vec<CulturalRecord> = static_region
                    .records
                    .get(category)
                    .iter()
                    .map(|record| record.to_record(category))
                    .collect();
                records.insert((region.id.clone(), category), converted);
            }

            regions.push(region);
        }

        Ok(Self {
            regions: Arc::new(regions),
            records: Arc::new(records),
        })
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }
}

#[async_trait]
impl CultureStore for MemoryCultureStore {
    fn backend_name(&self) -> &'static str {
        "static"
    }

    async fn list_regions(&self) -> Result<Vec<Region>> {
        Ok(self.regions.as_ref().clone())
    }

    async fn find_region(&self, name: &str) -> Result<Option<Region>> {
        Ok(self.regions.iter().find(|region| region.matches_name(name)).cloned())
    }

    async fn fetch_category(
        &self,
        region: &RegionId,
        category: Category,
    ) -> Result<Vec<CulturalRecord>> {
        Ok(self
            .records
            .get(&(region.clone(), category))
            .cloned()
            .unwrap_or_default())
    }

    async fn list_festival_events(&self, range: &DateRange) -> Result<Vec<FestivalEvent>> {
        let events = self
            .regions
            .iter()
            .flat_map(|region| {
                self.records
                    .get(&(region.id.clone(), Category::Festival))
                    .into_iter()
                    .flatten()
                    .filter_map(move |record| {
                        record.date.filter(|date| range.contains(*date)).map(|date| {
                            FestivalEvent {
                                region: region.name.clone(),
                                title: record.title.clone(),
                                date,
                            }
                        })
                    })
            })
            .collect();

        Ok(events)
    }
}
