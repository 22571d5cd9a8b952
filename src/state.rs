//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::client::SharedJudgeApi;
use crate::config::Config;
use crate::services::{EditorSession, SessionRegistry, ViewerHandle};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Judge API client
    api: SharedJudgeApi,

    /// Application configuration
    config: Config,

    /// Open problem editors
    editors: SessionRegistry<Mutex<EditorSession>>,

    /// Open submission viewers
    viewers: SessionRegistry<ViewerHandle>,
}

impl AppState {
    /// Create a new application state
    pub fn new(api: SharedJudgeApi, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                api,
                config,
                editors: SessionRegistry::default(),
                viewers: SessionRegistry::default(),
            }),
        }
    }

    /// Get a handle to the judge API client
    pub fn api(&self) -> SharedJudgeApi {
        Arc::clone(&self.inner.api)
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn editors(&self) -> &SessionRegistry<Mutex<EditorSession>> {
        &self.inner.editors
    }

    pub fn viewers(&self) -> &SessionRegistry<ViewerHandle> {
        &self.inner.viewers
    }

    /// Close editors and viewers idle for longer than the configured limit
    pub async fn sweep_idle_sessions(&self) -> usize {
        let now = Instant::now();
        let max_idle = self.config().console.session_idle();
        let editors = self.editors().sweep_idle(now, max_idle).await;
        let viewers = self.viewers().sweep_idle(now, max_idle).await;

        if editors + viewers > 0 {
            tracing::info!(editors, viewers, "Closed idle sessions");
        }
        editors + viewers
    }
}
