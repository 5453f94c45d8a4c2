use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use geojson::{FeatureCollection, JsonObject};
use kulture_core::models::{FetchedBundle, Region};

use crate::dto::RegionsResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_regions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RegionsResponse>, ApiError> {
    tracing::info!("Listing regions");

    let regions = state.aggregator.list_regions().await?;

    Ok(Json(RegionsResponse {
        backend: state.aggregator.backend_name(),
        regions,
    }))
}

pub async fn get_region(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Region>, ApiError> {
    let region = state.aggregator.resolve_region(&name).await?;
    Ok(Json(region))
}

/// Full five-category bundle. A partial bundle is still a 200; its
/// `warnings` name the categories that failed.
pub async fn get_region_bundle(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<FetchedBundle>, ApiError> {
    tracing::info!(region = %name, "Fetching bundle");

    let region = state.aggregator.resolve_region(&name).await?;
    let fetched = state.aggregator.fetch_bundle(&region).await?;

    if fetched.is_partial() {
        tracing::warn!(
            region = %region.name,
            failed = fetched.warnings.len(),
            "Serving partial bundle"
        );
    }

    Ok(Json(fetched))
}

/// Markers as a GeoJSON FeatureCollection with `center` ([lon, lat]) and
/// `warnings` carried as foreign members
pub async fn get_region_map(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<FeatureCollection>, ApiError> {
    tracing::info!(region = %name, "Fetching map");

    let region = state.aggregator.resolve_region(&name).await?;
    let map = state.aggregator.fetch_map(&region).await?;

    let mut collection = kulture_core::models::markers_to_geojson(&map.markers);

    let warnings = serde_json::to_value(&map.warnings).map_err(|e| {
        tracing::error!(error = %e, "Failed to encode map warnings");
        ApiError::internal("Failed to encode map")
    })?;

    let mut members = JsonObject::new();
    members.insert("region".to_string(), region.name.into());
    members.insert(
        "center".to_string(),
        serde_json::json!([map.center.lon(), map.center.lat()]),
    );
    members.insert("warnings".to_string(), warnings);
    collection.foreign_members = Some(members);

    Ok(Json(collection))
}
