pub mod bundle;
pub mod event;
pub mod record;
pub mod region;

pub use bundle::{markers_to_geojson, CategoryWarning, FetchedBundle, MapMarker, RegionBundle};
pub use event::{DateRange, FestivalEvent};
pub use record::{Category, CategorySchema, CulturalRecord};
pub use region::{Coordinate, Region, RegionId};
