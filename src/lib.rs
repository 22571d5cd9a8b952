//! Judge Console - administrative backend for a competitive-programming judge
//!
//! This library holds the state machines behind the problem editor and the
//! submission viewer of a judge admin console, plus the HTTP surface a view
//! layer drives them through.
//!
//! # Features
//!
//! - Problem editing with test groups and group requirements
//! - Lazily fetched submission artifacts (source, compiler output, per-test data)
//! - Problem and submission listings, new submissions, invoker administration
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Editor and viewer sessions
//! - **Console**: Pure reducers and reconciliation
//! - **Client**: Judge API access
//! - **Models**: Judge wire types

pub mod client;
pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
