//! Problem handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::editors::EditorResponse,
    services::ProblemService,
    state::AppState,
};

use super::{request::ListProblemsQuery, response::ProblemsListResponse};

/// List problems (paginated)
pub async fn list_problems(
    State(state): State<AppState>,
    Query(query): Query<ListProblemsQuery>,
) -> AppResult<Json<ProblemsListResponse>> {
    query.validate()?;

    let page = query.page.unwrap_or(1);
    let problems = ProblemService::list_problems(&state, query.count, Some(page)).await?;

    Ok(Json(ProblemsListResponse { problems, page }))
}

/// Open an editor for a new problem
pub async fn open_blank_editor(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<EditorResponse>)> {
    let editor = ProblemService::open_editor(&state, None).await?;
    Ok((StatusCode::CREATED, Json(editor)))
}

/// Open an editor on an existing problem
pub async fn open_problem_editor(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<(StatusCode, Json<EditorResponse>)> {
    let editor = ProblemService::open_editor(&state, Some(id)).await?;
    Ok((StatusCode::CREATED, Json(editor)))
}
