//! Region data aggregation over a [`CultureStore`]

use futures::future::join_all;
use std::sync::Arc;

use crate::error::{KultureError, Result};
use crate::models::event::sort_events;
use crate::models::{
    Category, CategoryWarning, Coordinate, DateRange, FestivalEvent, FetchedBundle, MapMarker,
    Region, RegionBundle,
};
use crate::ports::CultureStore;

/// Map-screen data for one region
#[derive(Debug, Clone)]
pub struct MapData {
    pub center: Coordinate,
    pub markers: Vec<MapMarker>,
    pub warnings: Vec<CategoryWarning>,
}

/// Builds normalised region bundles from whichever backend is configured
pub struct RegionAggregator {
    store: Arc<dyn CultureStore>,
    default_anchor: Coordinate,
}

impl RegionAggregator {
    pub fn new(store: Arc<dyn CultureStore>, default_anchor: Coordinate) -> Self {
        Self {
            store,
            default_anchor,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub fn default_anchor(&self) -> Coordinate {
        self.default_anchor
    }

    /// All known regions, ordered by display name (case-insensitive)
    pub async fn list_regions(&self) -> Result<Vec<Region>> {
        let mut regions = self.store.list_regions().await?;
        regions.sort_by_cached_key(|region| (region.name.to_lowercase(), region.name.clone()));
        tracing::debug!(backend = self.backend_name(), count = regions.len(), "Listed regions");
        Ok(regions)
    }

    /// Case-insensitive exact lookup by display name
    pub async fn resolve_region(&self, name: &str) -> Result<Region> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(KultureError::not_found(name));
        }

        self.store
            .find_region(trimmed)
            .await?
            .ok_or_else(|| KultureError::not_found(trimmed))
    }

    /// Fetch every category for `region`.
    ///
    /// A failed category yields an empty sequence and one warning. The call
    /// only fails when the source is unreachable for every category.
    pub async fn fetch_bundle(&self, region: &Region) -> Result<FetchedBundle> {
        self.fetch_categories(region, &Category::ALL).await
    }

    /// Fetch only the map-plottable categories and derive markers and centre
    pub async fn fetch_map(&self, region: &Region) -> Result<MapData> {
        let fetched = self.fetch_categories(region, &[Category::Heritage, Category::Festival]).await?;

        Ok(MapData {
            center: fetched.bundle.map_center(self.default_anchor),
            markers: fetched.bundle.markers(),
            warnings: fetched.warnings,
        })
    }

    pub fn map_center(&self, bundle: &RegionBundle) -> Coordinate {
        bundle.map_center(self.default_anchor)
    }

    /// Dated festivals inside `range`, ordered by date then title
    pub async fn list_events(&self, range: &DateRange) -> Result<Vec<FestivalEvent>> {
        let mut events = self.store.list_festival_events(range).await?;
        events.retain(|event| range.contains(event.date));
        sort_events(&mut events);
        Ok(events)
    }

    async fn fetch_categories(
        &self,
        region: &Region,
        categories: &[Category],
    ) -> Result<FetchedBundle> {
        let fetches = categories.iter().map(|&category| async move {
            (category, self.store.fetch_category(&region.id, category).await)
        });
        let results = join_all(fetches).await;

        let mut bundle = RegionBundle::empty(region.clone());
        let mut warnings = Vec::new();
        let mut unreachable = 0;

        for (category, result) in results {
            match result {
                Ok(records) => bundle.set(category, records),
                Err(e) => {
                    if e.is_source_unavailable() {
                        unreachable += 1;
                    }
                    tracing::warn!(
                        region = %region.name,
                        category = %category,
                        error = %e,
                        "Category fetch failed, continuing with partial data"
                    );
                    warnings.push(CategoryWarning::new(category));
                }
            }
        }

        if !categories.is_empty() && unreachable == categories.len() {
            return Err(KultureError::source_unavailable(format!(
                "all {} category fetches for {} failed",
                categories.len(),
                region.name
            )));
        }

        tracing::debug!(
            region = %region.name,
            records = bundle.total_records(),
            warnings = warnings.len(),
            "Assembled region bundle"
        );

        Ok(FetchedBundle { bundle, warnings })
    }
}
