//! Submission viewer task
//!
//! Each viewer owns a [`SubmissionViewState`] inside a spawned task fed by an
//! mpsc channel. After every processed message the task runs one
//! reconciliation pass and spawns a download per returned command; finished
//! downloads come back through the same channel as `Fetched` messages.

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use crate::{
    client::SharedJudgeApi,
    console::{
        CompilationArtifact, FetchCommand, Notification, SubmissionIntent, SubmissionViewState,
    },
    error::{AppError, AppResult},
    models::source_language,
};

/// Messages processed by a viewer task
#[derive(Debug)]
pub enum ViewerCommand {
    /// Fetch the submission again, discarding every slot
    Reload {
        reply: oneshot::Sender<ViewerSnapshot>,
    },
    Dispatch {
        intent: SubmissionIntent,
        reply: oneshot::Sender<AppResult<ViewerSnapshot>>,
    },
    Fetched(crate::console::FetchResult),
    Snapshot {
        reply: oneshot::Sender<ViewerSnapshot>,
    },
}

/// Point-in-time copy of a viewer
#[derive(Debug, Clone, Serialize)]
pub struct ViewerSnapshot {
    pub submission_id: u64,
    #[serde(flatten)]
    pub view: SubmissionViewState,
    /// Highlighting language of the loaded source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

/// Cloneable sender side of a viewer task
///
/// The task stops once every handle is dropped and no download is in flight.
#[derive(Debug, Clone)]
pub struct ViewerHandle {
    sender: mpsc::Sender<ViewerCommand>,
}

impl ViewerHandle {
    /// Start a viewer for `submission_id`; the submission is fetched first
    pub fn spawn(
        api: SharedJudgeApi,
        submission_id: u64,
        capacity: usize,
        notification_ttl: chrono::Duration,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(capacity);
        let actor = ViewerActor {
            submission_id,
            state: SubmissionViewState::new(),
            notification: None,
            notification_ttl,
            api,
            receiver,
            sender: sender.downgrade(),
        };
        tokio::spawn(actor.run());

        Self { sender }
    }

    pub async fn reload(&self) -> AppResult<ViewerSnapshot> {
        self.request(|reply| ViewerCommand::Reload { reply }).await
    }

    pub async fn dispatch(&self, intent: SubmissionIntent) -> AppResult<ViewerSnapshot> {
        self.request(|reply| ViewerCommand::Dispatch { intent, reply })
            .await?
    }

    pub async fn snapshot(&self) -> AppResult<ViewerSnapshot> {
        self.request(|reply| ViewerCommand::Snapshot { reply }).await
    }

    async fn request<R>(
        &self,
        command: impl FnOnce(oneshot::Sender<R>) -> ViewerCommand,
    ) -> AppResult<R> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(command(reply))
            .await
            .map_err(|_| viewer_stopped())?;
        response.await.map_err(|_| viewer_stopped())
    }
}

fn viewer_stopped() -> AppError {
    AppError::Internal(anyhow::anyhow!("submission viewer task stopped"))
}

struct ViewerActor {
    submission_id: u64,
    state: SubmissionViewState,
    notification: Option<Notification>,
    notification_ttl: chrono::Duration,
    api: SharedJudgeApi,
    receiver: mpsc::Receiver<ViewerCommand>,
    sender: mpsc::WeakSender<ViewerCommand>,
}

impl ViewerActor {
    async fn run(mut self) {
        self.load().await;

        while let Some(command) = self.receiver.recv().await {
            match command {
                ViewerCommand::Reload { reply } => {
                    self.load().await;
                    let _ = reply.send(self.snapshot());
                }
                ViewerCommand::Dispatch { intent, reply } => {
                    let result = self.apply(intent).map(|()| self.snapshot());
                    let _ = reply.send(result);
                }
                ViewerCommand::Fetched(result) => {
                    if let Err(e) = self.apply(SubmissionIntent::Fetched(result)) {
                        tracing::error!(
                            submission_id = self.submission_id,
                            error = %e,
                            "Fetch result does not fit the submission"
                        );
                    }
                }
                ViewerCommand::Snapshot { reply } => {
                    let _ = reply.send(self.snapshot());
                }
            }
        }

        tracing::debug!(submission_id = self.submission_id, "Submission viewer stopped");
    }

    async fn load(&mut self) {
        match self.api.get_submission(self.submission_id).await {
            Ok(submission) => {
                tracing::info!(
                    submission_id = self.submission_id,
                    tests = submission.tests_count(),
                    "Loaded submission"
                );
                self.notification = None;
                if let Err(e) = self.apply(SubmissionIntent::Load(submission)) {
                    tracing::error!(submission_id = self.submission_id, error = %e, "Failed to reset viewer");
                }
            }
            Err(e) => {
                tracing::warn!(submission_id = self.submission_id, error = %e, "Failed to load submission");
                self.notification = Some(Notification::failure(
                    e.display_message(),
                    self.notification_ttl,
                    Utc::now(),
                ));
            }
        }
    }

    /// Apply an intent, then run one reconciliation pass
    fn apply(&mut self, intent: SubmissionIntent) -> AppResult<()> {
        self.state = self.state.apply(intent)?;

        let (state, commands) = self.state.reconcile();
        self.state = state;
        for command in commands {
            self.execute(command);
        }
        Ok(())
    }

    fn execute(&self, command: FetchCommand) {
        let Some(sender) = self.sender.upgrade() else {
            return;
        };
        let api = std::sync::Arc::clone(&self.api);

        tokio::spawn(async move {
            let outcome = api.fetch_resource(command.target).await.map_err(|e| {
                tracing::warn!(path = %command.target.path(), error = %e, "Resource fetch failed");
                e.display_message()
            });
            // The viewer may have been closed meanwhile
            let _ = sender.send(ViewerCommand::Fetched(command.complete(outcome))).await;
        });
    }

    fn snapshot(&self) -> ViewerSnapshot {
        let source_language = self.state.submission().and_then(|submission| {
            let source = self.state.compilation().set.slot(CompilationArtifact::Source);
            source.data.as_ref().map(|data| {
                source_language(data.filename.as_deref().unwrap_or_default(), &submission.language)
            })
        });

        ViewerSnapshot {
            submission_id: self.submission_id,
            view: self.state.clone(),
            source_language,
            notification: self
                .notification
                .clone()
                .filter(|notification| notification.is_active(Utc::now())),
        }
    }
}
