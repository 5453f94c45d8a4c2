use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;
use std::collections::BTreeMap;

use super::record::{Category, CulturalRecord};
use super::region::{Coordinate, Region};

/// All categorised records for one region.
///
/// Every category key is always present; an empty sequence means "no data".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionBundle {
    region: Region,
    records: BTreeMap<Category, Vec<CulturalRecord>>,
}

impl RegionBundle {
    /// Create a bundle with all five categories present and empty
    pub fn empty(region: Region) -> Self {
        let records = Category::ALL.iter().map(|&category| (category, Vec::new())).collect();
        Self { region, records }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Replace the records of one category
    pub fn set(&mut self, category: Category, records: Vec<CulturalRecord>) {
        self.records.insert(category, records);
    }

    pub fn get(&self, category: Category) -> &[CulturalRecord] {
        self.records.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = (Category, &[CulturalRecord])> {
        self.records.iter().map(|(category, records)| (*category, records.as_slice()))
    }

    pub fn contains_category(&self, category: Category) -> bool {
        self.records.contains_key(&category)
    }

    pub fn total_records(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_records() == 0
    }

    /// Markers for every plottable record that carries a coordinate
    pub fn markers(&self) -> Vec<MapMarker> {
        [Category::Heritage, Category::Festival]
            .iter()
            .flat_map(|&category| self.get(category))
            .filter_map(|record| {
                record.plottable_coordinate().map(|coordinate| MapMarker {
                    category: record.category,
                    title: record.title.clone(),
                    coordinate,
                })
            })
            .collect()
    }

    /// Pick the map centre.
    ///
    /// First heritage coordinate, then first festival coordinate, then the
    /// region's anchor, then `default_anchor`.
    pub fn map_center(&self, default_anchor: Coordinate) -> Coordinate {
        let first_in = |category: Category| {
            self.get(category).iter().find_map(CulturalRecord::plottable_coordinate)
        };

        first_in(Category::Heritage)
            .or_else(|| first_in(Category::Festival))
            .or(self.region.anchor)
            .unwrap_or(default_anchor)
    }
}

/// Non-fatal failure of a single category fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryWarning {
    pub category: Category,
    pub message: String,
}

impl CategoryWarning {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            message: format!("{} could not be loaded; showing partial data", category.label()),
        }
    }
}

/// A bundle together with the warnings raised while assembling it
#[derive(Debug, Clone, Serialize)]
pub struct FetchedBundle {
    pub bundle: RegionBundle,
    pub warnings: Vec<CategoryWarning>,
}

impl FetchedBundle {
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A map-plottable point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub category: Category,
    pub title: String,
    pub coordinate: Coordinate,
}

/// Render markers as a GeoJSON FeatureCollection (coordinates in lon, lat order)
pub fn markers_to_geojson(markers: &[MapMarker]) -> FeatureCollection {
    let features = markers
        .iter()
        .map(|marker| {
            let mut properties = JsonObject::new();
            properties.insert("title".to_string(), marker.title.clone().into());
            properties.insert("category".to_string(), marker.category.as_str().into());

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![
                    marker.coordinate.lon(),
                    marker.coordinate.lat(),
                ]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::region::RegionId;

    fn region() -> Region {
        Region::new(RegionId::from_name("Rajasthan"), "Rajasthan")
    }

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_empty_bundle_has_all_categories() {
        let bundle = RegionBundle::empty(region());
        for category in Category::ALL {
            assert!(bundle.contains_category(category));
            assert!(bundle.get(category).is_empty());
        }
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_markers_skip_records_without_coordinates() {
        let mut bundle = RegionBundle::empty(region());
        bundle.set(
            Category::Heritage,
            vec![
                CulturalRecord::new(Category::Heritage, "Amber Fort", "Hilltop fort")
                    .with_coordinate(coord(26.98, 75.85)),
                CulturalRecord::new(Category::Heritage, "Stepwell", "No survey data"),
            ],
        );

        let markers = bundle.markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].title, "Amber Fort");
        // Detail output still holds both records
        assert_eq!(bundle.get(Category::Heritage).len(), 2);
    }

    #[test]
    fn test_center_prefers_heritage() {
        let mut bundle = RegionBundle::empty(region());
        bundle.set(
            Category::Heritage,
            vec![CulturalRecord::new(Category::Heritage, "Amber Fort", "Hilltop fort")
                .with_coordinate(coord(26.98, 75.85))],
        );
        bundle.set(
            Category::Festival,
            vec![CulturalRecord::new(Category::Festival, "Pushkar Fair", "Camel fair")
                .with_coordinate(coord(26.49, 74.55))],
        );

        assert_eq!(bundle.map_center(coord(20.5937, 78.9629)), coord(26.98, 75.85));
    }

    #[test]
    fn test_center_falls_back_to_region_anchor() {
        let mut bundle = RegionBundle::empty(region().with_anchor(coord(27.02, 74.22)));
        bundle.set(
            Category::Food,
            vec![CulturalRecord::new(Category::Food, "Dal Baati", "Baked wheat balls")],
        );

        assert_eq!(bundle.map_center(coord(20.5937, 78.9629)), coord(27.02, 74.22));
    }

    #[test]
    fn test_geojson_uses_lon_lat_order() {
        let markers = vec![MapMarker {
            category: Category::Festival,
            title: "Onam".to_string(),
            coordinate: coord(10.85, 76.27),
        }];

        let collection = markers_to_geojson(&markers);
        assert_eq!(collection.features.len(), 1);

        let geometry = collection.features[0].geometry.as_ref().unwrap();
        match &geometry.value {
            Value::Point(position) => assert_eq!(position, &vec![76.27, 10.85]),
            other => panic!("Expected point, got {:?}", other),
        }

        let properties = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(properties["category"], "festival");
    }
}
