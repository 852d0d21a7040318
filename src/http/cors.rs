//! Cross-origin headers for browser clients.
//!
//! # Responsibilities
//! - Build the fixed CORS header set from the request's `Origin`
//! - Answer preflight (`OPTIONS`) before any routing
//! - Merge CORS headers onto every response, overwriting upstream values
//!
//! # Design Decisions
//! - Origin is echoed, never allow-listed
//! - Applied in the handler, not as a tower layer: relayed upstream CORS
//!   headers are replaced, not merged

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;

const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const MAX_AGE_SECS: &str = "86400";

/// The five CORS headers for a request carrying `origin`.
///
/// An absent or empty origin yields `*`.
pub fn cors_headers(origin: Option<&HeaderValue>) -> HeaderMap {
    let allow_origin = origin
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("*"));

    let mut headers = HeaderMap::with_capacity(5);
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(MAX_AGE_SECS),
    );
    headers
}

/// Set the CORS headers on `response`, replacing any existing values.
pub fn with_cors(mut response: Response, origin: Option<&HeaderValue>) -> Response {
    let headers = response.headers_mut();
    for (name, value) in cors_headers(origin) {
        if let Some(name) = name {
            headers.insert(name, value);
        }
    }
    response
}

/// Empty 204 answer to a preflight request. CORS headers are added by the caller.
pub fn preflight() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    response
}
