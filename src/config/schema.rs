//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.
//! Secrets are deliberately absent: they come from the environment at request time.

use serde::{Deserialize, Serialize};

use crate::routing::Provider;

/// Root configuration for the credential proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Upstream timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Per-provider upstream base URL overrides.
    pub upstreams: UpstreamConfig,

    /// Secret lookup behaviour.
    pub secrets: SecretsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8787").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8787".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Timeouts for the outbound call.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Time allowed for the upstream to return response headers, in seconds.
    /// Body streaming is not bounded.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            upstream_secs: 100,
        }
    }
}

/// Upstream base URL overrides, keyed by provider.
///
/// `None` keeps the provider's production base.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamConfig {
    pub runway: Option<String>,
    pub marble: Option<String>,
    pub decart: Option<String>,
    pub kiri: Option<String>,
}

impl UpstreamConfig {
    /// The configured override for `provider`, if any.
    pub fn override_for(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::Runway => self.runway.as_deref(),
            Provider::Marble => self.marble.as_deref(),
            Provider::Decart => self.decart.as_deref(),
            Provider::Kiri => self.kiri.as_deref(),
        }
    }

    /// Point every provider at the same base (used by integration tests).
    pub fn all(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            runway: Some(base.clone()),
            marble: Some(base.clone()),
            decart: Some(base.clone()),
            kiri: Some(base),
        }
    }
}

/// Secret lookup configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SecretsConfig {
    /// Reject requests locally (500) when a provider's secret is unset or empty.
    pub require_present: bool,

    /// Optional prefix for the environment variable names (e.g. "PROXY_").
    pub env_prefix: Option<String>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
