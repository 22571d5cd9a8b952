//! Submission listing, new submissions and viewer entry points

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

/// Submission routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_submissions).post(handler::create_submission),
        )
        .route("/{id}/viewers", post(handler::open_viewer))
}
