//! Path prefix matching.
//!
//! # Design Decisions
//! - Literal, case-sensitive `starts_with`; no patterns or regex
//! - Matching returns the remainder so the caller never re-slices the path
//! - Paths are normalized with WHATWG URL rules before matching, so `..`
//!   and `%2e%2e` segments can never climb out of a prefix

use url::Url;

/// Resolve dot segments (plain and percent-encoded) in a request path.
///
/// Returns `None` for anything that is not an absolute path.
pub fn normalize_path(raw: &str) -> Option<String> {
    if !raw.starts_with('/') {
        return None;
    }
    let url = Url::parse(&format!("http://proxy.invalid{}", raw)).ok()?;
    Some(url.path().to_string())
}

/// Matches a literal path prefix and yields what follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the part of `path` after the prefix, or `None` if it does not match.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        path.strip_prefix(self.prefix.as_str())
    }
}
