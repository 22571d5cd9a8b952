//! Editor handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{error::AppResult, services::ProblemService, state::AppState};

use super::{request::EditorIntentRequest, response::EditorResponse};

pub async fn get_editor(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<EditorResponse>> {
    Ok(Json(ProblemService::editor(&state, session_id).await?))
}

/// Apply one intent to the edited problem
pub async fn dispatch_intent(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<EditorIntentRequest>,
) -> AppResult<Json<EditorResponse>> {
    let intent = payload.into_intent()?;
    Ok(Json(
        ProblemService::dispatch(&state, session_id, intent).await?,
    ))
}

/// Save the edited problem to the judge
///
/// Judge failures are reported through the snapshot notification.
pub async fn save_problem(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<EditorResponse>> {
    Ok(Json(ProblemService::save(&state, session_id).await?))
}

pub async fn close_editor(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    ProblemService::close_editor(&state, session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
