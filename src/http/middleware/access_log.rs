//! Access log middleware.
//! Logs every request once the inner service has produced a response.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::inflight::InFlight;
use crate::http::request::X_REQUEST_ID;

pub async fn access_log_middleware(
    State(inflight): State<InFlight>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let guard = inflight.track();
    let start = Instant::now();

    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(request).await;

    tracing::info!(
        client = %client,
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        request_id = %request_id,
        seq = %guard.seq(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "request"
    );

    response
}
