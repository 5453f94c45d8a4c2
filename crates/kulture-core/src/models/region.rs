use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{KultureError, Result};

/// Store-level key of a region
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub String);

impl RegionId {
    /// Derive a key from a display name ("Himachal Pradesh" -> "himachal-pradesh")
    pub fn from_name(name: &str) -> Self {
        let slug = name
            .split_whitespace()
            .map(|part| part.to_lowercase())
            .collect::<Vec<_>>()
            .join("-");
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// WGS 84 latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinateRepr")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct CoordinateRepr {
    lat: f64,
    lon: f64,
}

impl TryFrom<CoordinateRepr> for Coordinate {
    type Error = KultureError;

    fn try_from(repr: CoordinateRepr) -> Result<Self> {
        Coordinate::new(repr.lat, repr.lon)
    }
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);

        if valid {
            Ok(Self { lat, lon })
        } else {
            Err(KultureError::InvalidCoordinate { lat, lon })
        }
    }

    /// For compile-time constants known to be in range
    pub(crate) const fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a coordinate from nullable store columns.
    ///
    /// Yields `None` unless both halves are present and in range.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).ok(),
            _ => None,
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

impl FromStr for Coordinate {
    type Err = KultureError;

    /// Parses "lat,lon"
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || KultureError::ConfigInvalid {
            key: "coordinate".to_string(),
            reason: format!("Expected 'lat,lon', got '{}'", s),
        };

        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;
        Self::new(lat, lon)
    }
}

/// A first-level administrative area (a state) the user can pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    /// Used to centre the map when no record carries a coordinate
    pub anchor: Option<Coordinate>,
}

impl Region {
    pub fn new(id: RegionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            anchor: None,
        }
    }

    pub fn with_anchor(mut self, anchor: Coordinate) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Case-insensitive exact match against the display name
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_id_from_name() {
        assert_eq!(RegionId::from_name("Himachal Pradesh").as_str(), "himachal-pradesh");
        assert_eq!(RegionId::from_name("  Goa ").as_str(), "goa");
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(26.98, 75.85).is_ok());
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, -181.0).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_coordinate_from_parts_requires_both() {
        assert!(Coordinate::from_parts(Some(10.0), None).is_none());
        assert!(Coordinate::from_parts(None, Some(76.0)).is_none());
        assert!(Coordinate::from_parts(Some(10.0), Some(76.0)).is_some());
    }

    #[test]
    fn test_coordinate_parse() {
        let c: Coordinate = "20.5937, 78.9629".parse().unwrap();
        assert_eq!(c.lat(), 20.5937);
        assert_eq!(c.lon(), 78.9629);
        assert!("20.5".parse::<Coordinate>().is_err());
        assert!("abc,def".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_coordinate_deserialize_rejects_out_of_range() {
        let ok: std::result::Result<Coordinate, _> =
            serde_json::from_str(r#"{"lat": 15.29, "lon": 74.12}"#);
        assert!(ok.is_ok());

        let bad: std::result::Result<Coordinate, _> =
            serde_json::from_str(r#"{"lat": 150.0, "lon": 74.12}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_region_matches_name() {
        let region = Region::new(RegionId::from_name("Kerala"), "Kerala");
        assert!(region.matches_name("kerala"));
        assert!(region.matches_name(" KERALA "));
        assert!(!region.matches_name("Keral"));
    }
}
