//! Problem editor session handlers

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

/// Editor session routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{session}",
            get(handler::get_editor).delete(handler::close_editor),
        )
        .route("/{session}/intents", post(handler::dispatch_intent))
        .route("/{session}/save", post(handler::save_problem))
}
