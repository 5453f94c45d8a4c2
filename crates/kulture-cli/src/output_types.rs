use kulture_core::models::{Category, Coordinate, DateRange, FestivalEvent, Region};
use serde::Serialize;
use tabled::Tabled;

/// Output for regions command
#[derive(Debug, Serialize)]
pub struct RegionsOutput {
    pub backend: String,
    pub regions: Vec<Region>,
}

/// Output for events command
#[derive(Debug, Serialize)]
pub struct EventsOutput {
    pub range: DateRange,
    pub events: Vec<FestivalEvent>,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub entries: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ConfigEntry {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

/// Output for db status command
#[derive(Debug, Serialize)]
pub struct DbStatusOutput {
    pub migrations: Vec<MigrationRow>,
    pub pending: usize,
}

#[derive(Debug, Serialize, Tabled)]
pub struct MigrationRow {
    #[tabled(rename = "Version")]
    pub version: i64,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Applied")]
    pub applied: bool,
}

/// Output for db seed command
#[derive(Debug, Serialize)]
pub struct SeedOutput {
    pub regions: usize,
    pub records: usize,
}

#[derive(Tabled)]
pub struct RegionRow {
    #[tabled(rename = "State")]
    pub name: String,
    #[tabled(rename = "Key")]
    pub id: String,
    #[tabled(rename = "Anchor")]
    pub anchor: String,
}

impl From<&Region> for RegionRow {
    fn from(region: &Region) -> Self {
        Self {
            name: region.name.clone(),
            id: region.id.to_string(),
            anchor: format_coordinate(region.anchor),
        }
    }
}

#[derive(Tabled)]
pub struct RecordRow {
    #[tabled(rename = "Name")]
    pub title: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Location")]
    pub location: String,
}

#[derive(Tabled)]
pub struct MarkerRow {
    #[tabled(rename = "Type")]
    pub category: Category,
    #[tabled(rename = "Name")]
    pub title: String,
    #[tabled(rename = "Lat, Lon")]
    pub coordinate: Coordinate,
}

#[derive(Tabled)]
pub struct EventRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Festival")]
    pub title: String,
    #[tabled(rename = "State")]
    pub region: String,
}

impl From<&FestivalEvent> for EventRow {
    fn from(event: &FestivalEvent) -> Self {
        Self {
            date: event.date.format("%d %b %Y").to_string(),
            title: event.title.clone(),
            region: event.region.clone(),
        }
    }
}

pub fn format_coordinate(coordinate: Option<Coordinate>) -> String {
    coordinate.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
}
