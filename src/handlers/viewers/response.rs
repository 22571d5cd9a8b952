//! Viewer response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::services::ViewerSnapshot;

/// Viewer snapshot
#[derive(Debug, Serialize)]
pub struct ViewerResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub snapshot: ViewerSnapshot,
}
