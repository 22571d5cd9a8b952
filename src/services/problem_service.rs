//! Problem service
//!
//! Listing plus problem editor sessions. An editor evolves only through
//! intents until it is saved; load and save outcomes become notifications.

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    console::{Notification, ProblemEditState, ProblemIntent},
    constants::SAVED_CHANGES_MESSAGE,
    error::{AppError, AppResult},
    handlers::editors::EditorResponse,
    models::{Problem, ProblemSummary},
    state::AppState,
};

/// One open problem editor
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    state: ProblemEditState,
    /// Problem requested on open, `None` for the create flow
    source_id: Option<u64>,
    loaded: bool,
    notification: Option<Notification>,
}

impl EditorSession {
    /// Editor for a problem that does not exist yet
    pub fn blank() -> Self {
        Self {
            loaded: true,
            ..Self::default()
        }
    }

    /// Editor waiting for problem `id`
    pub fn loading(id: u64) -> Self {
        Self {
            source_id: Some(id),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &ProblemEditState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Record the outcome of the initial fetch
    ///
    /// A failed load keeps the previous state and only raises a notification.
    pub fn load_finished(
        &mut self,
        result: AppResult<Problem>,
        ttl: chrono::Duration,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        match result {
            Ok(problem) => {
                self.state = self.state.apply(ProblemIntent::Replace(problem))?;
                self.loaded = true;
                self.notification = None;
            }
            Err(e) => {
                tracing::warn!(problem_id = ?self.source_id, error = %e, "Failed to load problem");
                self.notification = Some(Notification::failure(e.display_message(), ttl, now));
            }
        }
        Ok(())
    }

    pub fn apply(&mut self, intent: ProblemIntent) -> AppResult<()> {
        self.ensure_loaded()?;
        self.state = self.state.apply(intent)?;
        Ok(())
    }

    /// Record the outcome of a save
    ///
    /// `created_id` is the id the judge assigned when the problem was new.
    pub fn save_finished(
        &mut self,
        result: AppResult<Option<u64>>,
        ttl: chrono::Duration,
        now: DateTime<Utc>,
    ) {
        let notification = match result {
            Ok(created_id) => {
                if let Some(id) = created_id {
                    self.state = self.state.with_id(id);
                }
                Notification::success(SAVED_CHANGES_MESSAGE, ttl, now)
            }
            Err(e) => {
                tracing::warn!(problem_id = ?self.state.problem().id, error = %e, "Failed to save problem");
                Notification::failure(e.display_message(), ttl, now)
            }
        };
        self.notification = Some(notification);
    }

    pub fn snapshot(&self, session_id: Uuid, now: DateTime<Utc>) -> EditorResponse {
        EditorResponse {
            session_id,
            loaded: self.loaded,
            problem: self.state.problem().clone(),
            requirement_candidates: self.state.requirement_candidates(),
            notification: self
                .notification
                .clone()
                .filter(|notification| notification.is_active(now)),
        }
    }

    fn ensure_loaded(&self) -> AppResult<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(AppError::Validation("Problem is not loaded".to_string()))
        }
    }
}

/// Problem service for business logic
pub struct ProblemService;

impl ProblemService {
    /// List problems known to the judge
    pub async fn list_problems(
        state: &AppState,
        count: Option<u32>,
        page: Option<u32>,
    ) -> AppResult<Vec<ProblemSummary>> {
        let count = count.unwrap_or(state.config().console.problems_page_size);
        state.api().list_problems(count, page.unwrap_or(1)).await
    }

    /// Open an editor, loading problem `problem_id` when given
    pub async fn open_editor(
        state: &AppState,
        problem_id: Option<u64>,
    ) -> AppResult<EditorResponse> {
        let mut session = match problem_id {
            Some(id) => EditorSession::loading(id),
            None => EditorSession::blank(),
        };

        if let Some(id) = problem_id {
            let result = state.api().get_problem(id).await;
            session.load_finished(result, state.config().console.notification_ttl(), Utc::now())?;
        }

        let (session_id, session) = state.editors().insert(Mutex::new(session)).await;
        tracing::info!(%session_id, ?problem_id, "Opened problem editor");

        let session = session.lock().await;
        Ok(session.snapshot(session_id, Utc::now()))
    }

    pub async fn editor(state: &AppState, session_id: Uuid) -> AppResult<EditorResponse> {
        let session = state.editors().get(session_id).await?;
        let session = session.lock().await;
        Ok(session.snapshot(session_id, Utc::now()))
    }

    /// Apply one intent; a rejected intent leaves the editor untouched
    pub async fn dispatch(
        state: &AppState,
        session_id: Uuid,
        intent: ProblemIntent,
    ) -> AppResult<EditorResponse> {
        let session = state.editors().get(session_id).await?;
        let mut session = session.lock().await;
        session.apply(intent)?;
        Ok(session.snapshot(session_id, Utc::now()))
    }

    /// Create or modify the edited problem on the judge
    pub async fn save(state: &AppState, session_id: Uuid) -> AppResult<EditorResponse> {
        let session = state.editors().get(session_id).await?;
        let mut session = session.lock().await;
        session.ensure_loaded()?;

        let problem = session.state().problem().clone();
        let api = state.api();
        let result = match problem.id {
            Some(id) => api.modify_problem(id, problem).await.map(|()| None),
            None => api.create_problem(problem).await.and_then(|created| {
                created.id.map(Some).ok_or_else(|| {
                    AppError::FetchFailed("Judge did not assign a problem id".to_string())
                })
            }),
        };

        if result.is_ok() {
            tracing::info!(%session_id, problem_id = ?session.state().problem().id, "Saved problem");
        }
        session.save_finished(result, state.config().console.notification_ttl(), Utc::now());
        Ok(session.snapshot(session_id, Utc::now()))
    }

    pub async fn close_editor(state: &AppState, session_id: Uuid) -> AppResult<()> {
        state.editors().remove(session_id).await?;
        tracing::info!(%session_id, "Closed problem editor");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::MockJudgeApi;
    use crate::config::test_config;
    use crate::console::GroupAction;

    fn state_with(api: MockJudgeApi) -> AppState {
        AppState::new(Arc::new(api), test_config())
    }

    fn named_problem(id: Option<u64>) -> Problem {
        Problem {
            id,
            name: "Sum".to_string(),
            ..Problem::default()
        }
    }

    #[tokio::test]
    async fn test_create_adopts_assigned_id() {
        let mut api = MockJudgeApi::new();
        api.expect_create_problem()
            .times(1)
            .returning(|problem| Ok(Problem { id: Some(41), ..problem }));
        let state = state_with(api);

        let editor = ProblemService::open_editor(&state, None).await.unwrap();
        ProblemService::dispatch(
            &state,
            editor.session_id,
            ProblemIntent::Group {
                index: None,
                action: GroupAction::AddGroup,
            },
        )
        .await
        .unwrap();

        let saved = ProblemService::save(&state, editor.session_id).await.unwrap();
        assert_eq!(saved.problem.id, Some(41));
        assert_eq!(saved.problem.test_groups.len(), 1);

        let notification = saved.notification.unwrap();
        assert!(notification.ok);
        assert_eq!(notification.message, SAVED_CHANGES_MESSAGE);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_edits() {
        let mut api = MockJudgeApi::new();
        api.expect_get_problem()
            .returning(|id| Ok(named_problem(Some(id))));
        api.expect_modify_problem()
            .times(1)
            .returning(|_, _| Err(AppError::FetchFailed("Can not modify problem".to_string())));
        let state = state_with(api);

        let editor = ProblemService::open_editor(&state, Some(7)).await.unwrap();
        assert!(editor.loaded);

        let intent = ProblemIntent::Field {
            field: "name".parse().unwrap(),
            value: "Sum of two".to_string(),
        };
        ProblemService::dispatch(&state, editor.session_id, intent)
            .await
            .unwrap();

        let saved = ProblemService::save(&state, editor.session_id).await.unwrap();
        assert_eq!(saved.problem.name, "Sum of two");
        assert_eq!(saved.problem.id, Some(7));

        let notification = saved.notification.unwrap();
        assert!(!notification.ok);
        assert_eq!(notification.message, "Can not modify problem");
    }

    #[tokio::test]
    async fn test_failed_load_blocks_edits_and_save() {
        let mut api = MockJudgeApi::new();
        api.expect_get_problem()
            .returning(|_| Err(AppError::FetchFailed("problem 9 does not exist".to_string())));
        api.expect_modify_problem().never();
        api.expect_create_problem().never();
        let state = state_with(api);

        let editor = ProblemService::open_editor(&state, Some(9)).await.unwrap();
        assert!(!editor.loaded);
        assert_eq!(
            editor.notification.unwrap().message,
            "problem 9 does not exist"
        );

        let err = ProblemService::save(&state, editor.session_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_closed_editor_is_gone() {
        let state = state_with(MockJudgeApi::new());
        let editor = ProblemService::open_editor(&state, None).await.unwrap();

        ProblemService::close_editor(&state, editor.session_id)
            .await
            .unwrap();
        let err = ProblemService::editor(&state, editor.session_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_notification_expires_from_snapshot() {
        let now = Utc::now();
        let ttl = chrono::Duration::seconds(3);
        let mut session = EditorSession::blank();
        session.save_finished(Ok(None), ttl, now);

        let id = Uuid::new_v4();
        assert!(session.snapshot(id, now).notification.is_some());
        assert!(session.snapshot(id, now + ttl).notification.is_none());
    }
}
