//! Viewer handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{error::AppResult, services::SubmissionService, state::AppState};

use super::{request::ViewerIntentRequest, response::ViewerResponse};

pub async fn get_viewer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<ViewerResponse>> {
    Ok(Json(SubmissionService::viewer(&state, session_id).await?))
}

/// Toggle an artifact set or reload the submission
pub async fn dispatch_intent(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<ViewerIntentRequest>,
) -> AppResult<Json<ViewerResponse>> {
    let viewer = match payload.into_intent() {
        Some(intent) => SubmissionService::dispatch(&state, session_id, intent).await?,
        None => SubmissionService::reload(&state, session_id).await?,
    };
    Ok(Json(viewer))
}

pub async fn close_viewer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    SubmissionService::close_viewer(&state, session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
