//! Problem response DTOs

use serde::Serialize;

use crate::models::ProblemSummary;

/// Problem list response
#[derive(Debug, Serialize)]
pub struct ProblemsListResponse {
    pub problems: Vec<ProblemSummary>,
    pub page: u32,
}
