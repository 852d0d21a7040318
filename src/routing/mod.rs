//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path + query
//!     → matcher.rs (normalize dot segments)
//!     → router.rs (ordered prefix scan)
//!     → matcher.rs (literal prefix strip)
//!     → Return: ResolvedRoute { provider, target_url } or None
//!
//! Route table construction (at startup):
//!     Provider::ALL
//!     → apply [upstreams] overrides from config
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime
//! - No regex (prefix matching only)
//! - First match wins (declaration order)
//! - Provider identity is a tagged enum, not a closure

pub mod matcher;
pub mod provider;
pub mod router;

pub use matcher::normalize_path;
pub use provider::{AuthHeader, Provider};
pub use router::{ResolvedRoute, Route, RouteTable};
