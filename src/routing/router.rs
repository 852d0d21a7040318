//! Route lookup and upstream URL construction.
//!
//! # Responsibilities
//! - Store the provider routes in declaration order
//! - Resolve a request path to a route and the full upstream URL
//! - Return an explicit no-match rather than a silent default
//!
//! # Design Decisions
//! - Immutable after construction (shared via `Arc`, no locks)
//! - O(n) prefix scan; first match wins
//! - Upstream bases may be overridden from config, never at runtime

use crate::config::UpstreamConfig;
use crate::routing::matcher::PathPrefixMatcher;
use crate::routing::provider::Provider;

/// A single provider route.
#[derive(Debug, Clone)]
pub struct Route {
    pub provider: Provider,
    matcher: PathPrefixMatcher,
    upstream_base: String,
}

impl Route {
    pub fn new(provider: Provider, upstream_base: impl Into<String>) -> Self {
        Self {
            provider,
            matcher: PathPrefixMatcher::new(provider.prefix()),
            upstream_base: upstream_base.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    pub fn upstream_base(&self) -> &str {
        &self.upstream_base
    }
}

/// Outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub provider: Provider,
    pub target_url: String,
}

/// Ordered, immutable table of provider routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build the table from explicit routes (order is preserved).
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Build the standard four-provider table, applying configured base overrides.
    pub fn from_config(upstreams: &UpstreamConfig) -> Self {
        let routes = Provider::ALL
            .into_iter()
            .map(|provider| {
                let base = upstreams
                    .override_for(provider)
                    .unwrap_or(provider.default_base());
                Route::new(provider, base)
            })
            .collect();
        Self { routes }
    }

    /// Declared prefixes, in table order.
    pub fn prefixes(&self) -> Vec<&str> {
        self.routes.iter().map(Route::prefix).collect()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve `path` (plus the raw query string, if any) to an upstream URL.
    pub fn resolve(&self, path: &str, query: Option<&str>) -> Option<ResolvedRoute> {
        self.routes.iter().find_map(|route| {
            let remainder = route.matcher.strip(path)?;
            let mut target_url =
                String::with_capacity(route.upstream_base.len() + remainder.len() + 1);
            target_url.push_str(&route.upstream_base);
            target_url.push_str(remainder);
            if let Some(q) = query.filter(|q| !q.is_empty()) {
                target_url.push('?');
                target_url.push_str(q);
            }
            Some(ResolvedRoute {
                provider: route.provider,
                target_url,
            })
        })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::from_config(&UpstreamConfig::default())
    }
}
