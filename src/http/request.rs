//! Request identification.
//!
//! Every request gets an `x-request-id` (UUID v4) as early as possible so the
//! access log and any error logs can be correlated. A client-supplied id is
//! kept.

use axum::http::{HeaderName, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

pub fn request_id_header() -> HeaderName {
    HeaderName::from_static(X_REQUEST_ID)
}

/// Generates UUID v4 request ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        Uuid::new_v4()
            .to_string()
            .parse()
            .ok()
            .map(RequestId::new)
    }
}
