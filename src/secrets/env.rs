//! Process-environment secret source.

use super::SecretSource;

/// Reads secrets from environment variables on every lookup.
#[derive(Debug, Clone, Default)]
pub struct EnvSecrets {
    prefix: Option<String>,
}

impl EnvSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `<prefix><KEY>` instead of `<KEY>`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

impl SecretSource for EnvSecrets {
    fn get(&self, key: &str) -> Option<String> {
        let name = match &self.prefix {
            Some(p) => format!("{}{}", p, key),
            None => key.to_string(),
        };
        std::env::var(name).ok()
    }
}
