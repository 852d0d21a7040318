//! Outbound header sanitization.
//!
//! # Responsibilities
//! - Strip headers that identify the client or the edge (origin, referer, cf-*, x-forwarded-*)
//! - Strip connection-scoped headers that are invalid to forward
//! - Pass every other header through untouched, duplicates included
//!
//! # Design Decisions
//! - `HeaderName` is always lowercase, so comparisons are case-insensitive for free
//! - Bodiless methods also drop framing headers so the upstream never waits for bytes

use axum::http::{header, HeaderMap, HeaderName, Method};

/// Headers never forwarded upstream.
pub const DENIED_HEADERS: &[&str] = &[
    "host",
    "origin",
    "referer",
    "cf-connecting-ip",
    "cf-ipcountry",
    "cf-ray",
    "cf-visitor",
    "x-forwarded-for",
    "x-forwarded-proto",
    "x-real-ip",
    "connection",
    "keep-alive",
];

pub fn is_denied(name: &HeaderName) -> bool {
    DENIED_HEADERS
        .iter()
        .any(|denied| name.as_str().eq_ignore_ascii_case(denied))
}

/// Methods whose outbound request never carries a body.
pub fn is_bodiless(method: &Method) -> bool {
    method == Method::GET || method == Method::HEAD
}

/// Copy `inbound` minus the deny-list.
pub fn sanitize_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound.iter() {
        if !is_denied(name) {
            outbound.append(name.clone(), value.clone());
        }
    }
    outbound
}

/// Sanitize for a specific method: bodiless methods lose their framing headers.
pub fn sanitize_for_method(inbound: &HeaderMap, method: &Method) -> HeaderMap {
    let mut outbound = sanitize_headers(inbound);
    if is_bodiless(method) {
        outbound.remove(header::CONTENT_LENGTH);
        outbound.remove(header::TRANSFER_ENCODING);
    }
    outbound
}
