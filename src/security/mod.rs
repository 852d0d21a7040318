//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request headers:
//!     → headers.rs (drop client/edge-identifying and hop-by-hop headers)
//!     → credentials.rs (overlay provider auth from the secret source)
//!     → Pass to forwarder
//! ```
//!
//! # Design Decisions
//! - Injected credentials always win over client-sent headers
//! - Secret values are marked sensitive and never logged
//! - No trust in client input

pub mod credentials;
pub mod headers;

pub use credentials::{inject_credentials, MissingSecretPolicy};
pub use headers::{sanitize_for_method, sanitize_headers, DENIED_HEADERS};
