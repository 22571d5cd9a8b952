//! Admin service

use crate::{error::AppResult, state::AppState};

/// Judge administration
pub struct AdminService;

impl AdminService {
    /// Invoker and queue snapshot as reported by the judge
    pub async fn master_status(state: &AppState) -> AppResult<serde_json::Value> {
        state.api().master_status().await
    }

    /// Drop cached problem data on every invoker
    pub async fn reset_invoker_cache(state: &AppState) -> AppResult<()> {
        state.api().reset_invoker_cache().await?;
        tracing::info!("Invoker cache reset");
        Ok(())
    }
}
