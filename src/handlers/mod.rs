//! HTTP Request Handlers
//!
//! Routes through which a view layer opens editor and viewer sessions,
//! dispatches intents and reads snapshots.

pub mod admin;
pub mod editors;
pub mod health;
pub mod problems;
pub mod submissions;
pub mod viewers;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/problems", problems::routes())
        .nest("/editors", editors::routes())
        .nest("/submissions", submissions::routes())
        .nest("/viewers", viewers::routes())
        .nest("/admin", admin::routes())
}
