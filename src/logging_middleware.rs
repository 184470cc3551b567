// src/logging_middleware.rs
//! Debug-level request/response logging

use axum::body::{to_bytes, Body, Bytes};
use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, enabled, Level};

/// Same ceiling as axum's default `Json` body limit
pub const MAX_LOGGED_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Pretty-prints JSON, falls back to the raw text, skips binary bodies
fn render_body(bytes: &Bytes) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let text = std::str::from_utf8(bytes).ok()?;
    let rendered = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or_else(|| text.to_string());
    Some(rendered)
}

/// Reads a request body for logging, refusing anything over the body limit
async fn buffer_request_body(body: Body) -> Result<Bytes, StatusCode> {
    to_bytes(body, MAX_LOGGED_BODY_BYTES)
        .await
        .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE)
}

/// Logs method, URI, status, latency and both bodies when debug logging is on
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !enabled!(Level::DEBUG) {
        return Ok(next.run(request).await);
    }

    let started = Instant::now();
    let (parts, body) = request.into_parts();
    let method = parts.method.clone();
    let uri = parts.uri.clone();

    let bytes = buffer_request_body(body).await?;

    match render_body(&bytes) {
        Some(request_body) => debug!(%method, %uri, %request_body, "Request"),
        None => debug!(%method, %uri, "Request"),
    }

    let response = next
        .run(Request::from_parts(parts, Body::from(bytes)))
        .await;

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let status = parts.status;
    let latency_ms = started.elapsed().as_millis() as u64;
    match render_body(&bytes) {
        Some(response_body) => {
            debug!(%method, %uri, %status, latency_ms, %response_body, "Response")
        }
        None => debug!(%method, %uri, %status, latency_ms, "Response"),
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}
