//! Submission handler implementations

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::viewers::ViewerResponse,
    services::SubmissionService,
    state::AppState,
};

use super::{
    request::{ListSubmissionsQuery, NewSubmissionForm},
    response::{CreateSubmissionResponse, SubmissionsListResponse},
};

/// List submissions (paginated, filtered)
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<ListSubmissionsQuery>,
) -> AppResult<Json<SubmissionsListResponse>> {
    query.validate()?;

    let page = query.page.unwrap_or(1);
    let submissions = SubmissionService::list_submissions(&state, query).await?;

    Ok(Json(SubmissionsListResponse { submissions, page }))
}

/// Send a new solution for judging
pub async fn create_submission(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<CreateSubmissionResponse>)> {
    let submission = NewSubmissionForm::read(multipart).await?.into_submission()?;
    let id = SubmissionService::submit(&state, submission).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(CreateSubmissionResponse {
            id,
            message: "Submission received and queued for judging".to_string(),
        }),
    ))
}

/// Open a viewer on a submission
pub async fn open_viewer(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<(StatusCode, Json<ViewerResponse>)> {
    let viewer = SubmissionService::open_viewer(&state, id).await?;
    Ok((StatusCode::CREATED, Json(viewer)))
}
