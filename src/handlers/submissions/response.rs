//! Submission response DTOs

use serde::Serialize;

use crate::models::SubmissionSummary;

/// Submission list response
#[derive(Debug, Serialize)]
pub struct SubmissionsListResponse {
    pub submissions: Vec<SubmissionSummary>,
    pub page: u32,
}

/// Create submission response
#[derive(Debug, Serialize)]
pub struct CreateSubmissionResponse {
    pub id: u64,
    pub message: String,
}
