//! Per-request access logging.

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use log::{info, warn};
use std::time::Instant;

/// Logs method, matched route, status and latency for every request.
pub(crate) async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = req.method().as_str().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;
    let status = response.status().as_u16();
    let duration_ms = started_at.elapsed().as_millis();

    if status >= 500 {
        warn!(
            "event=http_request module=api status=error method={method} route={route} http_status={status} duration_ms={duration_ms}"
        );
    } else {
        info!(
            "event=http_request module=api status=ok method={method} route={route} http_status={status} duration_ms={duration_ms}"
        );
    }

    response
}
