//! Problem listing and editor entry points

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

/// Problem routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_problems))
        .route("/editors", post(handler::open_blank_editor))
        .route("/{id}/editors", post(handler::open_problem_editor))
}
