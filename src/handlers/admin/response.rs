//! Admin response DTOs

use serde::Serialize;

/// Acknowledgement of an admin action
#[derive(Debug, Serialize)]
pub struct AdminActionResponse {
    pub message: String,
}
