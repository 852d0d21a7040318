//! In-process stop request for the proxy.
//!
//! Backed by a `watch` channel holding a single "stop requested" flag, so a
//! receiver created after `trigger` still observes the request.

use tokio::sync::watch;

/// Receiver side handed to [`HttpServer::run`](crate::HttpServer::run).
pub type StopSignal = watch::Receiver<bool>;

/// Owner of the stop flag. Dropping it without triggering leaves only OS
/// signals as a way to stop the server.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> StopSignal {
        self.tx.subscribe()
    }

    /// Request a stop. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
