//! Provider identities and their credential header templates.
//!
//! # Responsibilities
//! - Name the four upstream providers the proxy fronts
//! - Map each provider to its route prefix and default upstream base
//! - Build the provider's auth headers from the secret source
//!
//! # Design Decisions
//! - Tagged enum instead of per-route closures: the table stays declarative
//! - Header names are static and lowercase (`http` normalizes them anyway)
//! - A missing secret renders as an empty value; policy lives in the caller

use axum::http::HeaderName;

use crate::secrets::SecretSource;

const RUNWAY_VERSION: &str = "2024-11-06";

/// An upstream API provider whose credentials the proxy holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Runway,
    Marble,
    Decart,
    Kiri,
}

/// A single header to be injected, with the secret already substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeader {
    pub name: HeaderName,
    pub value: String,
}

impl Provider {
    /// All providers in route-table declaration order.
    pub const ALL: [Provider; 4] = [
        Provider::Runway,
        Provider::Marble,
        Provider::Decart,
        Provider::Kiri,
    ];

    /// Short name used in config keys and logs.
    pub fn name(self) -> &'static str {
        match self {
            Provider::Runway => "runway",
            Provider::Marble => "marble",
            Provider::Decart => "decart",
            Provider::Kiri => "kiri",
        }
    }

    /// Path prefix, always with leading and trailing slash.
    pub fn prefix(self) -> &'static str {
        match self {
            Provider::Runway => "/runway/",
            Provider::Marble => "/marble/",
            Provider::Decart => "/decart/",
            Provider::Kiri => "/kiri/",
        }
    }

    /// Production upstream base URL (trailing slash included).
    pub fn default_base(self) -> &'static str {
        match self {
            Provider::Runway => "https://api.dev.runwayml.com/v1/",
            Provider::Marble => "https://api.worldlabs.ai/marble/v1/",
            Provider::Decart => "https://api.decart.ai/v1/",
            Provider::Kiri => "https://api.kiriengine.app/api/",
        }
    }

    /// Name of the secret holding this provider's API key.
    pub fn secret_key(self) -> &'static str {
        match self {
            Provider::Runway => "RUNWAY_KEY",
            Provider::Marble => "MARBLE_KEY",
            Provider::Decart => "DECART_KEY",
            Provider::Kiri => "KIRI_API_KEY",
        }
    }

    /// Build the headers to inject for this provider.
    ///
    /// An absent secret yields an empty substitution, e.g. `Bearer `.
    pub fn auth_headers(self, secrets: &dyn SecretSource) -> Vec<AuthHeader> {
        let key = secrets.get(self.secret_key()).unwrap_or_default();

        match self {
            Provider::Runway => vec![
                AuthHeader {
                    name: HeaderName::from_static("authorization"),
                    value: format!("Bearer {}", key),
                },
                AuthHeader {
                    name: HeaderName::from_static("x-runway-version"),
                    value: RUNWAY_VERSION.to_string(),
                },
            ],
            Provider::Marble => vec![AuthHeader {
                name: HeaderName::from_static("wlt-api-key"),
                value: key,
            }],
            Provider::Decart => vec![AuthHeader {
                name: HeaderName::from_static("x-api-key"),
                value: key,
            }],
            Provider::Kiri => vec![AuthHeader {
                name: HeaderName::from_static("authorization"),
                value: format!("Bearer {}", key),
            }],
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::MemorySecrets;

    fn secrets() -> MemorySecrets {
        MemorySecrets::from_pairs([
            ("RUNWAY_KEY", "rw-secret"),
            ("MARBLE_KEY", "mb-secret"),
            ("DECART_KEY", "dc-secret"),
            ("KIRI_API_KEY", "kr-secret"),
        ])
    }

    fn as_pairs(headers: Vec<AuthHeader>) -> Vec<(String, String)> {
        headers
            .into_iter()
            .map(|h| (h.name.as_str().to_string(), h.value))
            .collect()
    }

    #[test]
    fn runway_injects_bearer_and_version() {
        let headers = as_pairs(Provider::Runway.auth_headers(&secrets()));
        assert_eq!(
            headers,
            vec![
                ("authorization".to_string(), "Bearer rw-secret".to_string()),
                ("x-runway-version".to_string(), "2024-11-06".to_string()),
            ]
        );
    }

    #[test]
    fn marble_decart_kiri_header_shapes() {
        let s = secrets();
        assert_eq!(
            as_pairs(Provider::Marble.auth_headers(&s)),
            vec![("wlt-api-key".to_string(), "mb-secret".to_string())]
        );
        assert_eq!(
            as_pairs(Provider::Decart.auth_headers(&s)),
            vec![("x-api-key".to_string(), "dc-secret".to_string())]
        );
        assert_eq!(
            as_pairs(Provider::Kiri.auth_headers(&s)),
            vec![("authorization".to_string(), "Bearer kr-secret".to_string())]
        );
    }

    #[test]
    fn missing_secret_renders_empty() {
        let empty = MemorySecrets::new();
        let headers = as_pairs(Provider::Kiri.auth_headers(&empty));
        assert_eq!(headers[0].1, "Bearer ");

        let headers = as_pairs(Provider::Decart.auth_headers(&empty));
        assert_eq!(headers[0].1, "");
    }

    #[test]
    fn prefixes_are_slash_delimited() {
        for provider in Provider::ALL {
            assert!(provider.prefix().starts_with('/'));
            assert!(provider.prefix().ends_with('/'));
            assert!(provider.default_base().ends_with('/'));
        }
    }
}
