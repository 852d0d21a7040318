//! Request-path error taxonomy and its HTTP mapping.
//!
//! Upstream application errors (4xx/5xx from a provider) never become a
//! `ProxyError`; they are relayed verbatim by the forwarder.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::routing::Provider;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// `/fetch` called without a usable `url` parameter.
    #[error("Missing url param")]
    MissingUrlParam,

    /// Path matched no provider route and no reserved route.
    #[error("Not found")]
    NotFound,

    /// Transport-level failure reaching the target (DNS, connect, TLS, I/O).
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),

    /// Upstream did not produce response headers in time.
    #[error("upstream did not respond within {0} seconds")]
    UpstreamTimeout(u64),

    /// Target URL could not be parsed.
    #[error("invalid target url: {0}")]
    InvalidTarget(#[from] url::ParseError),

    /// Secret is unset or empty and the proxy runs with `require_present`.
    #[error("provider {0} is not configured")]
    MissingCredential(Provider),

    /// Secret contains bytes that cannot appear in a header value.
    #[error("provider {0} has an invalid credential")]
    InvalidCredential(Provider),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingUrlParam => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::UpstreamTimeout(_) | Self::InvalidTarget(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::MissingCredential(_) | Self::InvalidCredential(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::MissingUrlParam | Self::NotFound => (status, self.to_string()).into_response(),
            _ => {
                tracing::error!(status = %status, error = %self, "Proxy error");
                (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
            }
        }
    }
}
