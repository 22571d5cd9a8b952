//! Judge administration handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Admin routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(handler::get_master_status))
        .route("/invoker-cache/reset", post(handler::reset_invoker_cache))
}
