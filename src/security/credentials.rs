//! Credential injection.
//!
//! Injected headers are set with `insert`, replacing every client-sent value
//! under the same name, so a client can never override or spoof upstream auth.

use axum::http::{HeaderMap, HeaderValue};

use crate::error::ProxyError;
use crate::routing::Provider;
use crate::secrets::SecretSource;

/// How to treat a provider whose secret is unset or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingSecretPolicy {
    /// Inject an empty credential and let the upstream reject it.
    #[default]
    PassThrough,
    /// Fail locally with 500 before contacting the upstream.
    Reject,
}

/// Overlay `provider`'s auth headers onto `headers`.
pub fn inject_credentials(
    headers: &mut HeaderMap,
    provider: Provider,
    secrets: &dyn SecretSource,
    policy: MissingSecretPolicy,
) -> Result<(), ProxyError> {
    if !secrets.is_present(provider.secret_key()) {
        tracing::warn!(
            provider = %provider,
            secret = provider.secret_key(),
            "Provider secret is not set"
        );
        if policy == MissingSecretPolicy::Reject {
            return Err(ProxyError::MissingCredential(provider));
        }
    }

    for auth in provider.auth_headers(secrets) {
        let mut value = HeaderValue::from_str(&auth.value)
            .map_err(|_| ProxyError::InvalidCredential(provider))?;
        value.set_sensitive(true);
        headers.insert(auth.name, value);
    }
    Ok(())
}
