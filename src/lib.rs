//! Credential-injecting edge proxy.
//!
//! Browser clients call `/<provider>/<rest>`; the proxy resolves the provider's
//! upstream base, strips client/edge-identifying headers, injects the
//! provider's API key from server-held secrets, forwards the request, and
//! streams the response back with permissive CORS headers. `/fetch?url=` proxies
//! an arbitrary URL without credentials.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod secrets;
pub mod security;

pub use config::schema::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
