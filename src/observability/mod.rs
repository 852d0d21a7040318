//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → http::server TraceLayer (one span per request, with request_id)
//!
//! Consumers:
//!     → stdout (pretty, compact, or JSON lines)
//! ```
//!
//! # Design Decisions
//! - Structured fields only; header values and secrets are never recorded
//! - `RUST_LOG` overrides the configured level

pub mod logging;
