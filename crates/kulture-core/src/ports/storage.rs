use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Category, CulturalRecord, DateRange, FestivalEvent, Region, RegionId};

/// Port for the backing store of cultural records.
///
/// Implementations return rows in their natural order and leave sorting,
/// bundling and failure isolation to the aggregator.
#[async_trait]
pub trait CultureStore: Send + Sync {
    /// Short backend name used in logs
    fn backend_name(&self) -> &'static str;

    /// List every known region
    async fn list_regions(&self) -> Result<Vec<Region>>;

    /// Find a region by display name, case-insensitively
    async fn find_region(&self, name: &str) -> Result<Option<Region>>;

    /// Fetch all records of one category scoped to a region
    async fn fetch_category(
        &self,
        region: &RegionId,
        category: Category,
    ) -> Result<Vec<CulturalRecord>>;

    /// List dated festivals across all regions that fall inside `range`
    async fn list_festival_events(&self, range: &DateRange) -> Result<Vec<FestivalEvent>>;
}
