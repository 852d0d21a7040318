//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, request span, dispatch)
//!     → cors.rs (OPTIONS short-circuit)
//!     → response.rs (health) | routing::RouteTable (provider) | /fetch
//!     → security (sanitize headers, inject credentials)
//!     → forward.rs (upstream call, streaming relay)
//!     → cors.rs (stamp CORS headers)
//!     → Send to client
//! ```

pub mod cors;
pub mod forward;
pub mod response;
pub mod server;

pub use forward::Forwarder;
pub use server::{HttpServer, ServerError, FETCH_PATH, HEALTH_PATH};
