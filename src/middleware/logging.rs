//! Logging middleware

use std::time::Instant;

use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::{debug, info, warn};

use crate::constants::API_BASE_PATH;

/// Request logging middleware
///
/// Health probes are logged at debug level; everything else at info, or warn
/// when the request failed.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let session = session_of(&path).map(str::to_string);

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    if path.ends_with("/health") {
        debug!(%method, %path, status = status.as_u16(), %duration_ms, "Health probe");
    } else if status.is_server_error() || status == StatusCode::BAD_GATEWAY {
        warn!(
            %method,
            %path,
            session = session.as_deref(),
            status = status.as_u16(),
            %duration_ms,
            "Request failed"
        );
    } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
        warn!(
            %method,
            %path,
            session = session.as_deref(),
            status = status.as_u16(),
            %duration_ms,
            "Request rejected"
        );
    } else {
        info!(
            %method,
            %path,
            session = session.as_deref(),
            status = status.as_u16(),
            %duration_ms,
            "Request completed"
        );
    }

    response
}

/// Editor or viewer session id addressed by `path`, if any
fn session_of(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(API_BASE_PATH).unwrap_or(path);
    let mut segments = rest.trim_start_matches('/').split('/');
    match segments.next() {
        Some("editors" | "viewers") => segments.next().filter(|s| !s.is_empty()),
        _ => None,
    }
}
