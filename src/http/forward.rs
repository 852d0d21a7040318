//! Upstream forwarding and response relay.
//!
//! # Responsibilities
//! - Send the prepared request to the target URL
//! - Stream the client body upstream (never for GET/HEAD)
//! - Relay status, reason phrase, headers and a streaming body back
//! - Turn transport failures into `ProxyError`
//!
//! # Design Decisions
//! - One shared `reqwest::Client` with pooling; direct egress, system proxies ignored
//! - Only the wait for response headers is bounded; body streaming is not
//! - Dropping the returned response (client gone) drops the upstream stream,
//!   which aborts the outbound connection
//! - Upstream 4xx/5xx are relayed, never intercepted

use std::time::Duration;

use axum::body::{Body, HttpBody};
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use reqwest::{Client, Url};

use crate::config::TimeoutConfig;
use crate::error::ProxyError;
use crate::security::headers::is_bodiless;

/// Issues outbound requests and relays the responses.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    upstream_timeout: Duration,
}

impl Forwarder {
    /// Build the shared HTTP client from timeout config.
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .no_proxy()
            .build()?;
        Ok(Self::with_client(
            client,
            Duration::from_secs(timeouts.upstream_secs),
        ))
    }

    pub fn with_client(client: Client, upstream_timeout: Duration) -> Self {
        Self {
            client,
            upstream_timeout,
        }
    }

    /// Send `method target` with `headers`, streaming `body` when the method allows one.
    pub async fn forward(
        &self,
        target: &str,
        method: Method,
        headers: HeaderMap,
        body: Body,
    ) -> Result<Response, ProxyError> {
        let url = Url::parse(target)?;
        let mut request = self.client.request(method.clone(), url).headers(headers);

        if !is_bodiless(&method) && body.size_hint().exact() != Some(0) {
            request = request.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        let upstream = tokio::time::timeout(self.upstream_timeout, request.send())
            .await
            .map_err(|_| ProxyError::UpstreamTimeout(self.upstream_timeout.as_secs()))??;

        tracing::debug!(status = %upstream.status(), "Upstream responded");
        Ok(relay(upstream))
    }
}

/// Convert an upstream response into a client response without buffering.
pub fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = upstream.headers().clone();
    let reason = upstream
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .cloned();

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    if let Some(reason) = reason {
        response.extensions_mut().insert(reason);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn invalid_target_is_bad_gateway() {
        let forwarder = Forwarder::new(&TimeoutConfig::default()).unwrap();
        let err = forwarder
            .forward("not a url", Method::GET, HeaderMap::new(), Body::empty())
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::InvalidTarget(_)));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn refused_connection_is_bad_gateway() {
        // Bind then drop to get a port with nothing listening.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let forwarder = Forwarder::new(&TimeoutConfig::default()).unwrap();
        let err = forwarder
            .forward(
                &format!("http://{}/x", addr),
                Method::POST,
                HeaderMap::new(),
                Body::from("payload"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::Upstream(_)));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        // Accepts connections but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let forwarder = Forwarder::with_client(Client::new(), Duration::from_millis(200));
        let err = forwarder
            .forward(
                &format!("http://{}/slow", addr),
                Method::GET,
                HeaderMap::new(),
                Body::empty(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::UpstreamTimeout(_)));
    }
}
