//! Submission service
//!
//! Listing, new submissions and submission viewer sessions.

use uuid::Uuid;

use crate::{
    console::SubmissionIntent,
    error::AppResult,
    handlers::viewers::ViewerResponse,
    models::{NewSubmission, SubmissionSummary, SubmissionsFilter},
    state::AppState,
};

use super::viewer::ViewerHandle;

/// Submission service for business logic
pub struct SubmissionService;

impl SubmissionService {
    /// List submissions matching `filter`
    pub async fn list_submissions(
        state: &AppState,
        filter: SubmissionsFilter,
    ) -> AppResult<Vec<SubmissionSummary>> {
        state
            .api()
            .list_submissions(filter, state.config().console.submissions_page_size)
            .await
    }

    /// Send a solution for judging
    pub async fn submit(state: &AppState, submission: NewSubmission) -> AppResult<u64> {
        let problem_id = submission.problem_id;
        let language = submission.language.clone();

        let id = state.api().submit(submission).await?;
        tracing::info!(submission_id = id, problem_id, %language, "Sent new submission");
        Ok(id)
    }

    /// Open a viewer; the snapshot reflects the initial load
    pub async fn open_viewer(state: &AppState, submission_id: u64) -> AppResult<ViewerResponse> {
        let console = &state.config().console;
        let handle = ViewerHandle::spawn(
            state.api(),
            submission_id,
            console.viewer_channel_capacity,
            console.notification_ttl(),
        );

        let snapshot = handle.snapshot().await?;
        let (session_id, _) = state.viewers().insert(handle).await;
        tracing::info!(%session_id, submission_id, "Opened submission viewer");

        Ok(ViewerResponse {
            session_id,
            snapshot,
        })
    }

    pub async fn viewer(state: &AppState, session_id: Uuid) -> AppResult<ViewerResponse> {
        let handle = state.viewers().get(session_id).await?;
        Ok(ViewerResponse {
            session_id,
            snapshot: handle.snapshot().await?,
        })
    }

    /// Apply one intent; a rejected intent leaves the viewer untouched
    pub async fn dispatch(
        state: &AppState,
        session_id: Uuid,
        intent: SubmissionIntent,
    ) -> AppResult<ViewerResponse> {
        let handle = state.viewers().get(session_id).await?;
        Ok(ViewerResponse {
            session_id,
            snapshot: handle.dispatch(intent).await?,
        })
    }

    /// Fetch the submission again, dropping every loaded artifact
    pub async fn reload(state: &AppState, session_id: Uuid) -> AppResult<ViewerResponse> {
        let handle = state.viewers().get(session_id).await?;
        Ok(ViewerResponse {
            session_id,
            snapshot: handle.reload().await?,
        })
    }

    pub async fn close_viewer(state: &AppState, session_id: Uuid) -> AppResult<()> {
        state.viewers().remove(session_id).await?;
        tracing::info!(%session_id, "Closed submission viewer");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::MockJudgeApi;
    use crate::config::test_config;
    use crate::error::AppError;
    use crate::models::Verdict;

    #[tokio::test]
    async fn test_list_uses_configured_page_size() {
        let mut api = MockJudgeApi::new();
        api.expect_list_submissions()
            .withf(|filter, default_count| filter.problem_id == Some(3) && *default_count == 50)
            .times(1)
            .returning(|_, _| {
                Ok(vec![SubmissionSummary {
                    id: 10,
                    problem_id: 3,
                    language: "g++".to_string(),
                    score: 1.0,
                    verdict: Verdict::OK,
                    current_test: None,
                }])
            });
        let state = AppState::new(Arc::new(api), test_config());

        let filter = SubmissionsFilter {
            problem_id: Some(3),
            ..SubmissionsFilter::default()
        };
        let submissions = SubmissionService::list_submissions(&state, filter)
            .await
            .unwrap();
        assert_eq!(submissions.len(), 1);
    }

    #[tokio::test]
    async fn test_viewer_session_lifecycle() {
        let mut api = MockJudgeApi::new();
        api.expect_get_submission()
            .returning(|_| Err(AppError::FetchFailed("judge is down".to_string())));
        let state = AppState::new(Arc::new(api), test_config());

        let viewer = SubmissionService::open_viewer(&state, 12).await.unwrap();
        assert_eq!(viewer.snapshot.submission_id, 12);
        assert!(viewer.snapshot.notification.is_some());

        SubmissionService::close_viewer(&state, viewer.session_id)
            .await
            .unwrap();
        let err = SubmissionService::viewer(&state, viewer.session_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
