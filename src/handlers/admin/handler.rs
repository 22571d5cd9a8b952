//! Admin handler implementations

use axum::{Json, extract::State};

use crate::{error::AppResult, services::AdminService, state::AppState};

use super::response::AdminActionResponse;

/// Invoker and queue status, passed through from the judge
pub async fn get_master_status(
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    Ok(Json(AdminService::master_status(&state).await?))
}

/// Reset the problem cache of every invoker
pub async fn reset_invoker_cache(
    State(state): State<AppState>,
) -> AppResult<Json<AdminActionResponse>> {
    AdminService::reset_invoker_cache(&state).await?;
    Ok(Json(AdminActionResponse {
        message: "Invoker cache reset".to_string(),
    }))
}
