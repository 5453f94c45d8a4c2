use std::sync::Arc;

use axum::extract::{rejection::QueryRejection, Query, State};
use axum::Json;
use kulture_core::models::DateRange;

use crate::dto::{EventsQuery, EventsResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EventsQuery>, QueryRejection>,
) -> Result<Json<EventsResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        ApiError::bad_request("Expected start and end dates as YYYY-MM-DD")
            .with_details(rejection.body_text())
    })?;

    let range = DateRange::new(query.start, query.end)?;
    tracing::info!(start = %range.start(), end = %range.end(), "Listing events");

    let events = state.aggregator.list_events(&range).await?;

    Ok(Json(EventsResponse {
        start: range.start(),
        end: range.end(),
        events,
    }))
}
