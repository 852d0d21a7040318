//! Secret lookup.
//!
//! Provider API keys never live in config files or in the route table. They
//! are looked up by name at request time through [`SecretSource`], so a
//! rotated key is picked up on the next request without a restart.

pub mod env;
pub mod memory;

pub use env::EnvSecrets;
pub use memory::MemorySecrets;

/// Key-value lookup for named secrets (e.g. `RUNWAY_KEY`).
///
/// Implementations must be `Send + Sync` so they can be shared across
/// request tasks behind `Arc<dyn SecretSource>`.
pub trait SecretSource: Send + Sync {
    /// Return the secret stored under `key`, or `None` if it is not set.
    fn get(&self, key: &str) -> Option<String>;

    /// True when `key` is set to a non-empty value.
    fn is_present(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }
}
