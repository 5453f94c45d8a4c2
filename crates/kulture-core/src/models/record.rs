use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::region::Coordinate;

/// The five fixed groupings of cultural records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Heritage,
    Festival,
    Food,
    Handicraft,
    Scheme,
}

/// Storage layout of one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySchema {
    pub table: &'static str,
    pub title_column: &'static str,
    pub description_column: &'static str,
    pub image_column: Option<&'static str>,
    /// Whether rows carry latitude/longitude columns
    pub has_coordinates: bool,
    pub date_column: Option<&'static str>,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 5] = [
        Category::Heritage,
        Category::Festival,
        Category::Food,
        Category::Handicraft,
        Category::Scheme,
    ];

    pub fn schema(self) -> CategorySchema {
        match self {
            Category::Heritage => CategorySchema {
                table: "tourist_places",
                title_column: "name",
                description_column: "description",
                image_column: Some("url"),
                has_coordinates: true,
                date_column: None,
            },
            Category::Festival => CategorySchema {
                table: "festivals",
                title_column: "name",
                description_column: "description",
                image_column: Some("url"),
                has_coordinates: true,
                date_column: Some("observed_on"),
            },
            Category::Food => CategorySchema {
                table: "local_foods",
                title_column: "dish_name",
                description_column: "description",
                image_column: Some("url"),
                has_coordinates: false,
                date_column: None,
            },
            Category::Handicraft => CategorySchema {
                table: "handicrafts",
                title_column: "craft_name",
                description_column: "description",
                image_column: Some("url"),
                has_coordinates: false,
                date_column: None,
            },
            Category::Scheme => CategorySchema {
                table: "government_schemes",
                title_column: "scheme_name",
                description_column: "description",
                image_column: None,
                has_coordinates: false,
                date_column: None,
            },
        }
    }

    /// Whether records of this category can appear as map markers
    pub fn is_plottable(self) -> bool {
        self.schema().has_coordinates
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Heritage => "Tourist Places",
            Category::Festival => "Festivals",
            Category::Food => "Local Foods",
            Category::Handicraft => "Handicrafts",
            Category::Scheme => "Government Schemes",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Heritage => "heritage",
            Category::Festival => "festival",
            Category::Food => "food",
            Category::Handicraft => "handicraft",
            Category::Scheme => "scheme",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One card's worth of cultural information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalRecord {
    pub category: Category,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub coordinate: Option<Coordinate>,
    /// Observance date, festivals only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl CulturalRecord {
    pub fn new(category: Category, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            category,
            title: title.into(),
            description: description.into(),
            image: None,
            coordinate: None,
            date: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Coordinate usable for a map marker, if the category is plottable
    pub fn plottable_coordinate(&self) -> Option<Coordinate> {
        if self.category.is_plottable() {
            self.coordinate
        } else {
            None
        }
    }
}
