//! Request identification and tracing.
//!
//! # Responsibilities
//! - Name the request ID header shared by the ID layers
//! - Read the ID back from a request
//! - Build the per-request trace span
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Incoming IDs are kept and echoed back unchanged

use axum::{body::Body, http::Request};
use tracing::Span;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Access to the request ID assigned by the ID layer.
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

/// Span opened around every inbound request.
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request.request_id(),
    )
}
