//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, bind address parses)
//! - Validate upstream overrides are absolute http(s) bases
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;
use crate::routing::Provider;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("upstreams.{provider} '{url}' {reason}")]
    Upstream {
        provider: &'static str,
        url: String,
        reason: &'static str,
    },

    #[error("listener.tls.{0} must not be empty")]
    TlsPath(&'static str),
}

/// Check `config` and collect every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.trim().is_empty() {
            errors.push(ValidationError::TlsPath("cert_path"));
        }
        if tls.key_path.trim().is_empty() {
            errors.push(ValidationError::TlsPath("key_path"));
        }
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream_secs"));
    }

    for provider in Provider::ALL {
        if let Some(base) = config.upstreams.override_for(provider) {
            if let Some(reason) = check_upstream_base(base) {
                errors.push(ValidationError::Upstream {
                    provider: provider.name(),
                    url: base.to_string(),
                    reason,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_upstream_base(base: &str) -> Option<&'static str> {
    let parsed = match Url::parse(base) {
        Ok(url) => url,
        Err(_) => return Some("is not an absolute URL"),
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return Some("must use http or https");
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Some("must not carry a query or fragment");
    }
    if !base.ends_with('/') {
        return Some("must end with '/'");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{TlsConfig, UpstreamConfig};

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&ProxyConfig::default()), Ok(()));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.connect_secs = 0;
        config.timeouts.upstream_secs = 0;
        config.listener.tls = Some(TlsConfig {
            cert_path: "".into(),
            key_path: "key.pem".into(),
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroTimeout("upstream_secs")));
        assert!(errors.contains(&ValidationError::TlsPath("cert_path")));
    }

    #[test]
    fn upstream_overrides_are_checked() {
        let mut config = ProxyConfig::default();
        config.upstreams = UpstreamConfig {
            runway: Some("http://127.0.0.1:9000/v1".into()),
            marble: Some("ftp://files.example/".into()),
            decart: Some("relative/path/".into()),
            kiri: Some("https://api.kiriengine.app/api/".into()),
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        for err in &errors {
            if let ValidationError::Upstream { provider, .. } = err {
                assert_ne!(*provider, "kiri");
            }
        }
    }
}
