//! Serialized dataset shape shared by the built-in data, fixture files and `db seed`

use chrono::NaiveDate;
use kulture_core::error::{KultureError, Result};
use kulture_core::models::{Category, Coordinate, CulturalRecord, Region, RegionId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUILTIN_DATASET: &str = include_str!("../data/builtin_dataset.json");

/// A complete set of regions and their records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticDataset {
    pub regions: Vec<StaticRegion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticRegion {
    /// Derived from `name` when omitted
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub anchor: Option<Coordinate>,
    #[serde(default)]
    pub records: StaticRecords,
}

/// Records of one region, keyed by category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticRecords {
    #[serde(default)]
    pub heritage: Vec<StaticRecord>,
    #[serde(default)]
    pub festival: Vec<StaticRecord>,
    #[serde(default)]
    pub food: Vec<StaticRecord>,
    #[serde(default)]
    pub handicraft: Vec<StaticRecord>,
    #[serde(default)]
    pub scheme: Vec<StaticRecord>,
}

impl StaticRecords {
    pub fn get(&self, category: Category) -> &[StaticRecord] {
        match category {
            Category::Heritage => &self.heritage,
            Category::Festival => &self.festival,
            Category::Food => &self.food,
            Category::Handicraft => &self.handicraft,
            Category::Scheme => &self.scheme,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl StaticRecord {
    pub fn to_record(&self, category: Category) -> CulturalRecord {
        let schema = category.schema();
        CulturalRecord {
            category,
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone().filter(|_| schema.image_column.is_some()),
            coordinate: self.coordinate.filter(|_| schema.has_coordinates),
            date: self.date.filter(|_| schema.date_column.is_some()),
        }
    }
}

impl StaticRegion {
    pub fn region_id(&self) -> RegionId {
        match &self.id {
            Some(id) => RegionId(id.clone()),
            None => RegionId::from_name(&self.name),
        }
    }

    pub fn to_region(&self) -> Region {
        Region {
            id: self.region_id(),
            name: self.name.clone(),
            anchor: self.anchor,
        }
    }
}

impl StaticDataset {
    /// The dataset compiled into the binary
    pub fn builtin() -> Result<Self> {
        serde_json::from_str(BUILTIN_DATASET).map_err(|e| {
            KultureError::Serialization(format!("Built-in dataset is malformed: {}", e))
        })
    }

    /// Load a fixture file; `.toml` files are parsed as TOML, anything else as JSON
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| KultureError::ConfigInvalid {
            key: "fixture".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let dataset: Self = if is_toml {
            toml::from_str(&content).map_err(|e| {
                KultureError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| {
                KultureError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })?
        };

        tracing::debug!(path = %path.display(), regions = dataset.regions.len(), "Loaded fixture");
        Ok(dataset)
    }

    pub fn record_count(&self) -> usize {
        self.regions
            .iter()
            .map(|region| {
                Category::ALL
                    .iter()
                    .map(|&category| region.records.get(category).len())
                    .sum::<usize>()
            })
            .sum()
    }
}
