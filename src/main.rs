//! Judge Console - Application Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use judge_console::{
    client::HttpJudgeClient,
    config::CONFIG,
    constants::API_BASE_PATH,
    handlers,
    middleware::logging_middleware,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting judge console...");

    let client = HttpJudgeClient::new(&CONFIG.judge_api)?;
    tracing::info!(judge_api = %CONFIG.judge_api.base_url, "Judge API client ready");

    // Create application state
    let state = AppState::new(Arc::new(client), CONFIG.clone());

    // Close sessions the view layer abandoned
    let sweeper = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CONFIG.console.session_sweep_interval());
        loop {
            interval.tick().await;
            sweeper.sweep_idle_sessions().await;
        }
    });

    // Build the router
    let app = Router::new()
        .nest(API_BASE_PATH, handlers::routes())
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
