use chrono::NaiveDate;
use kulture_core::models::{FestivalEvent, Region};
use kulture_core::session::Interaction;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub backend: &'static str,
}

impl HealthResponse {
    pub fn ok(backend: &'static str) -> Self {
        Self {
            status: "ok",
            service: "kulture-api",
            backend,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegionsResponse {
    pub backend: &'static str,
    pub regions: Vec<Region>,
}

/// Query string of the events endpoint
#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub events: Vec<FestivalEvent>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    #[serde(flatten)]
    pub interaction: Interaction,
}

/// Delete operation response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn success(resource_type: &str, id: &str) -> Self {
        Self {
            success: true,
            message: format!("Deleted {} {}", resource_type, id),
        }
    }
}
