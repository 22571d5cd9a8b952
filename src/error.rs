//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework.
//!
//! Intent errors (`InvalidIntent`, `InvalidGroupAction`, `InvalidIndex`,
//! `InvalidTestIndex`) mean the caller built a request the console never
//! offers. They are logged loudly and the operation is rejected as a whole.
//! `FetchFailed` is the one recoverable kind: it ends up inside a resource
//! slot or a notification instead of aborting anything.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Malformed intents
    #[error("Invalid intent: {0}")]
    InvalidIntent(String),

    #[error("Invalid group action: {0}")]
    InvalidGroupAction(String),

    #[error("Invalid group index {index}, problem has {len} groups")]
    InvalidIndex { index: usize, len: usize },

    #[error("Invalid test {test}, submission has {count} tests")]
    InvalidTestIndex { test: usize, count: usize },

    // Judge API errors
    #[error("{0}")]
    FetchFailed(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidIntent(_) => "INVALID_INTENT",
            Self::InvalidGroupAction(_) => "INVALID_GROUP_ACTION",
            Self::InvalidIndex { .. } => "INVALID_INDEX",
            Self::InvalidTestIndex { .. } => "INVALID_TEST_INDEX",
            Self::FetchFailed(_) => "FETCH_FAILED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidIntent(_)
            | Self::InvalidGroupAction(_)
            | Self::InvalidIndex { .. }
            | Self::InvalidTestIndex { .. } => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::FetchFailed(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) | Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error comes from a malformed intent
    pub fn is_intent_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidIntent(_)
                | Self::InvalidGroupAction(_)
                | Self::InvalidIndex { .. }
                | Self::InvalidTestIndex { .. }
        )
    }

    /// Message suitable for an inline resource slot or a notification
    pub fn display_message(&self) -> String {
        match self {
            Self::FetchFailed(message) => message.clone(),
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_intent_error() {
            tracing::error!(code = self.error_code(), "Rejected malformed intent: {}", self);
        }

        // Log internal errors but don't expose details to clients
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                self.display_message()
            }
            AppError::FetchFailed(e) => {
                tracing::warn!("Judge API request failed: {}", e);
                self.display_message()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchFailed(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_errors_are_bad_requests() {
        let errors = [
            AppError::InvalidIntent("color".to_string()),
            AppError::InvalidGroupAction("rename_all".to_string()),
            AppError::InvalidIndex { index: 4, len: 2 },
            AppError::InvalidTestIndex { test: 0, count: 3 },
        ];
        for err in errors {
            assert!(err.is_intent_error());
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_fetch_failed_keeps_upstream_message() {
        let err = AppError::FetchFailed("Submission with id 7 not found".to_string());
        assert!(!err.is_intent_error());
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.display_message(), "Submission with id 7 not found");
    }
}
