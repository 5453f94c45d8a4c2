//! Scripted store used by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use kulture_core::error::{KultureError, Result};
use kulture_core::models::{
    Category, Coordinate, CulturalRecord, DateRange, FestivalEvent, Region, RegionId,
};
use kulture_core::ports::CultureStore;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct ScriptedStore {
    pub regions: Vec<Region>,
    pub records: HashMap<(RegionId, Category), Vec<CulturalRecord>>,
    /// Categories whose fetch fails with a query error
    pub broken: HashSet<Category>,
    /// Every call fails as if the database were down
    pub offline: bool,
    pub fetch_calls: AtomicUsize,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    pub fn with_records(mut self, region: &Region, category: Category, records: Vec<CulturalRecord>) -> Self {
        self.records.insert((region.id.clone(), category), records);
        self
    }

    pub fn with_broken(mut self, category: Category) -> Self {
        self.broken.insert(category);
        self
    }

    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            Err(KultureError::source_unavailable("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CultureStore for ScriptedStore {
    fn backend_name(&self) -> &'static str {
        "scripted"
    }

    async fn list_regions(&self) -> Result<Vec<Region>> {
        self.check_online()?;
        Ok(self.regions.clone())
    }

    async fn find_region(&self, name: &str) -> Result<Option<Region>> {
        self.check_online()?;
        Ok(self.regions.iter().find(|r| r.matches_name(name)).cloned())
    }

    async fn fetch_category(&self, region: &RegionId, category: Category) -> Result<Vec<CulturalRecord>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        if self.broken.contains(&category) {
            return Err(KultureError::Storage {
                reason: format!("relation \"{}\" does not exist", category.schema().table),
            });
        }
        Ok(self.records.get(&(region.clone(), category)).cloned().unwrap_or_default())
    }

    async fn list_festival_events(&self, range: &DateRange) -> Result<Vec<FestivalEvent>> {
        self.check_online()?;
        let mut events = Vec::new();
        for region in &self.regions {
            if let Some(festivals) = self.records.get(&(region.id.clone(), Category::Festival)) {
                for festival in festivals {
                    if let Some(date) = festival.date.filter(|d| range.contains(*d)) {
                        events.push(FestivalEvent {
                            region: region.name.clone(),
                            title: festival.title.clone(),
                            date,
                        });
                    }
                }
            }
        }
        Ok(events)
    }
}

pub fn region(name: &str) -> Region {
    Region::new(RegionId::from_name(name), name)
}

pub fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Rajasthan with a plotted fort, Kerala with only a plotted festival,
/// Goa with no coordinates at all
pub fn sample_store() -> ScriptedStore {
    let rajasthan = region("Rajasthan");
    let kerala = region("Kerala");
    let goa = region("Goa");

    ScriptedStore::new()
        .with_region(rajasthan.clone())
        .with_region(kerala.clone())
        .with_region(goa.clone())
        .with_records(
            &rajasthan,
            Category::Heritage,
            vec![CulturalRecord::new(Category::Heritage, "Amber Fort", "Hilltop fort near Jaipur")
                .with_coordinate(coord(26.98, 75.85))],
        )
        .with_records(
            &rajasthan,
            Category::Festival,
            vec![CulturalRecord::new(Category::Festival, "Desert Festival", "Jaisalmer dunes")
                .with_coordinate(coord(26.91, 70.91))
                .with_date(date(2025, 2, 14))],
        )
        .with_records(
            &rajasthan,
            Category::Food,
            vec![CulturalRecord::new(Category::Food, "Dal Baati Churma", "Baked wheat balls")],
        )
        .with_records(
            &kerala,
            Category::Festival,
            vec![CulturalRecord::new(Category::Festival, "Onam", "Harvest festival")
                .with_coordinate(coord(10.85, 76.27))
                .with_date(date(2025, 8, 28))],
        )
        .with_records(
            &goa,
            Category::Food,
            vec![CulturalRecord::new(Category::Food, "Fish Curry Rice", "Coconut gravy")],
        )
}
