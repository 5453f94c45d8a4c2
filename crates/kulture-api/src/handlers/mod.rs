mod events;
mod guide;
mod health;
mod regions;
mod sessions;

pub use events::list_events;
pub use guide::get_guide;
pub use health::health_check;
pub use regions::{get_region, get_region_bundle, get_region_map, list_regions};
pub use sessions::{create_session, delete_session, get_session, post_action};
