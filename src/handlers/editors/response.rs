//! Editor response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::{console::Notification, models::Problem};

/// Editor snapshot
#[derive(Debug, Serialize)]
pub struct EditorResponse {
    pub session_id: Uuid,
    /// False while the requested problem could not be fetched
    pub loaded: bool,
    pub problem: Problem,
    /// Names each group may still add as a requirement, by group index
    pub requirement_candidates: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}
