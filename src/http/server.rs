//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy handler and middleware
//! - Bind server to listener (plain or TLS)
//! - Normalize the request path, then dispatch it down the decision tree:
//!   preflight → health → provider route → generic fetch → 404
//! - Attach CORS headers to every response

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::http::{cors, forward::Forwarder, response};
use crate::lifecycle::signals::shutdown_requested;
use crate::lifecycle::StopSignal;
use crate::net::tls::load_tls_config;
use crate::routing::{normalize_path, RouteTable};
use crate::secrets::{EnvSecrets, SecretSource};
use crate::security::{inject_credentials, sanitize_for_method, MissingSecretPolicy};

/// Liveness endpoint.
pub const HEALTH_PATH: &str = "/health";
/// Generic fetch endpoint; target comes from the `url` query parameter.
pub const FETCH_PATH: &str = "/fetch";

const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub secrets: Arc<dyn SecretSource>,
    pub forwarder: Forwarder,
    pub missing_secret_policy: MissingSecretPolicy,
}

/// HTTP server for the credential proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server whose secrets come from the process environment.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let secrets = match &config.secrets.env_prefix {
            Some(prefix) => EnvSecrets::with_prefix(prefix.clone()),
            None => EnvSecrets::new(),
        };
        Self::with_secrets(config, Arc::new(secrets))
    }

    /// Create a server with an explicit secret source.
    pub fn with_secrets(
        config: ProxyConfig,
        secrets: Arc<dyn SecretSource>,
    ) -> Result<Self, ServerError> {
        let missing_secret_policy = if config.secrets.require_present {
            MissingSecretPolicy::Reject
        } else {
            MissingSecretPolicy::PassThrough
        };

        let state = AppState {
            routes: Arc::new(RouteTable::from_config(&config.upstreams)),
            secrets,
            forwarder: Forwarder::new(&config.timeouts)?,
            missing_secret_policy,
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %req.method(),
                    path = %req.uri().path(),
                )
            }))
    }

    /// The fully layered router (used directly by tests).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires or the process receives Ctrl-C / SIGTERM.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: StopSignal,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;

        match &self.config.listener.tls {
            Some(tls) => {
                let rustls =
                    load_tls_config(Path::new(&tls.cert_path), Path::new(&tls.key_path)).await?;
                tracing::info!(address = %addr, "HTTPS server starting");

                let handle = axum_server::Handle::new();
                let drain = handle.clone();
                tokio::spawn(async move {
                    shutdown_requested(shutdown).await;
                    drain.graceful_shutdown(Some(DRAIN_TIMEOUT));
                });

                axum_server::from_tcp_rustls(listener.into_std()?, rustls)
                    .handle(handle)
                    .serve(self.router.into_make_service())
                    .await?;
            }
            None => {
                tracing::info!(address = %addr, "HTTP server starting");
                axum::serve(listener, self.router)
                    .with_graceful_shutdown(shutdown_requested(shutdown))
                    .await?;
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler: dispatch, then stamp CORS headers on whatever came back.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let origin = request.headers().get(header::ORIGIN).cloned();

    let response = match dispatch(&state, request).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    };

    cors::with_cors(response, origin.as_ref())
}

async fn dispatch(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    if request.method() == Method::OPTIONS {
        return Ok(cors::preflight());
    }

    let path = normalize_path(request.uri().path()).ok_or(ProxyError::NotFound)?;
    if path == HEALTH_PATH {
        return Ok(response::health(&state.routes));
    }

    if let Some(resolved) = state.routes.resolve(&path, request.uri().query()) {
        let (parts, body) = request.into_parts();
        let mut headers = sanitize_for_method(&parts.headers, &parts.method);
        inject_credentials(
            &mut headers,
            resolved.provider,
            state.secrets.as_ref(),
            state.missing_secret_policy,
        )?;

        tracing::debug!(provider = %resolved.provider, "Forwarding to provider");
        return state
            .forwarder
            .forward(&resolved.target_url, parts.method, headers, body)
            .await;
    }

    if path == FETCH_PATH {
        let target = fetch_target(request.uri().query()).ok_or(ProxyError::MissingUrlParam)?;
        let (parts, body) = request.into_parts();
        let headers = sanitize_for_method(&parts.headers, &parts.method);

        tracing::debug!("Forwarding generic fetch");
        return state
            .forwarder
            .forward(&target, parts.method, headers, body)
            .await;
    }

    Err(ProxyError::NotFound)
}

/// Value of the first `url` query parameter, percent-decoded.
///
/// An empty first value counts as missing, even if a later `url` pair is set.
pub fn fetch_target(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
