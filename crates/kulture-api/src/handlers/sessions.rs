use std::sync::Arc;

use axum::extract::{rejection::JsonRejection, Path, State};
use axum::http::StatusCode;
use axum::Json;
use kulture_core::session::{Interaction, UserAction};
use uuid::Uuid;

use crate::dto::{DeleteResponse, SessionResponse};
use crate::error::ApiError;
use crate::state::{AppState, SharedSession};

pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let (id, session) = state.create_session().await.ok_or_else(|| {
        ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "Too many active sessions")
    })?;
    tracing::info!(session_id = %id, "Created session");

    let interaction = session.lock().await.current_view().await;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            id: id.to_string(),
            interaction,
        }),
    ))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (id, session) = lookup(&state, &session_id).await?;
    let interaction = session.lock().await.current_view().await;

    Ok(Json(SessionResponse {
        id: id.to_string(),
        interaction,
    }))
}

/// Apply one action. Rejected actions are reported as notices in a 200
/// response, alongside the screen the session fell back to.
pub async fn post_action(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    action: Result<Json<UserAction>, JsonRejection>,
) -> Result<Json<Interaction>, ApiError> {
    let Json(action) = action.map_err(|rejection| {
        ApiError::new(rejection.status(), "Invalid action").with_details(rejection.body_text())
    })?;

    let (id, session) = lookup(&state, &session_id).await?;
    tracing::info!(session_id = %id, action = ?action, "Applying action");

    let interaction = session.lock().await.interact(action).await;
    Ok(Json(interaction))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&session_id)?;

    if !state.remove_session(id).await {
        return Err(ApiError::not_found("Session not found"));
    }

    tracing::info!(session_id = %id, "Deleted session");
    Ok(Json(DeleteResponse::success("session", &session_id)))
}

fn parse_id(session_id: &str) -> Result<Uuid, ApiError> {
    session_id
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid session ID format"))
}

async fn lookup(state: &AppState, session_id: &str) -> Result<(Uuid, SharedSession), ApiError> {
    let id = parse_id(session_id)?;
    let session = state
        .session(id)
        .await
        .ok_or_else(|| ApiError::not_found("Session not found"))?;
    Ok((id, session))
}
