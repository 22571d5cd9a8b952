//! Submission viewer session handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Viewer session routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{session}",
            get(handler::get_viewer).delete(handler::close_viewer),
        )
        .route("/{session}/intents", post(handler::dispatch_intent))
}
