//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use credential_proxy::config::{ProxyConfig, UpstreamConfig};
use credential_proxy::secrets::MemorySecrets;
use credential_proxy::{HttpServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// What the mock upstream saw for one request.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get(name)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// A running mock upstream that records every request it receives.
#[derive(Clone)]
pub struct EchoUpstream {
    pub addr: SocketAddr,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

impl EchoUpstream {
    /// Base URL suitable for `[upstreams]` overrides.
    pub fn base(&self) -> String {
        format!("http://{}/v1/", self.addr)
    }

    pub fn last(&self) -> Recorded {
        self.seen
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("upstream saw no requests")
    }

    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn all(&self) -> Vec<Recorded> {
        self.seen.lock().unwrap().clone()
    }
}

/// Start a mock upstream on an ephemeral port.
///
/// - `/v1/status/<code>` answers with that status, an `x-upstream` header and a
///   restrictive `access-control-allow-origin` the proxy must overwrite.
/// - Anything else answers 200 with a JSON echo of path, query and body length.
pub async fn start_echo_upstream() -> EchoUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let recorder = seen.clone();
    let app = Router::new().fallback(move |request: Request<Body>| {
        let recorder = recorder.clone();
        async move { echo(request, recorder).await }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    EchoUpstream { addr, seen }
}

async fn echo(request: Request<Body>, recorder: Arc<Mutex<Vec<Recorded>>>) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, 64 * 1024 * 1024)
        .await
        .unwrap_or_default();

    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in parts.headers.iter() {
        headers
            .entry(name.as_str().to_string())
            .or_default()
            .push(value.to_str().unwrap_or("<binary>").to_string());
    }

    let recorded = Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        headers,
        body: body.to_vec(),
    };
    recorder.lock().unwrap().push(recorded.clone());

    if let Some(code) = recorded.path.strip_prefix("/v1/status/") {
        let status = code
            .parse::<u16>()
            .ok()
            .and_then(|c| StatusCode::from_u16(c).ok())
            .unwrap_or(StatusCode::OK);
        return Response::builder()
            .status(status)
            .header("x-upstream", "echo")
            .header("access-control-allow-origin", "https://upstream.example")
            .header("content-type", "text/plain")
            .body(Body::from(format!("upstream said {}", status.as_u16())))
            .unwrap();
    }

    axum::Json(serde_json::json!({
        "method": recorded.method,
        "path": recorded.path,
        "query": recorded.query,
        "body_len": recorded.body.len(),
    }))
    .into_response()
}

/// The four provider secrets used across tests.
pub fn test_secrets() -> MemorySecrets {
    MemorySecrets::from_pairs([
        ("RUNWAY_KEY", "rw-test-key"),
        ("MARBLE_KEY", "mb-test-key"),
        ("DECART_KEY", "dc-test-key"),
        ("KIRI_API_KEY", "kr-test-key"),
    ])
}

/// Config with every provider pointed at `base`.
pub fn config_for(base: impl Into<String>) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstreams = UpstreamConfig::all(base);
    config.timeouts.upstream_secs = 5;
    config
}

/// A running proxy. Dropping it leaves the server running until `stop`.
pub struct RunningProxy {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl RunningProxy {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }

    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

/// Start the proxy on an ephemeral port with explicit secrets.
pub async fn start_proxy(config: ProxyConfig, secrets: MemorySecrets) -> RunningProxy {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::with_secrets(config, Arc::new(secrets)).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    RunningProxy { addr, shutdown }
}

/// Client that never goes through a system proxy and never pools.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Send a request line exactly as written, bypassing client-side URL
/// normalization, and return the response status line.
pub async fn raw_get(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, addr
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}
