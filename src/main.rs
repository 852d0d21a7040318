//! Credential proxy (v1)
//!
//! Keeps third-party API keys server-side so they never reach the browser.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────────┐
//!                         │                  CREDENTIAL PROXY                    │
//!   Client Request        │  ┌────────┐   ┌─────────┐   ┌──────────┐            │
//!   ──────────────────────┼─▶│  cors  │──▶│ routing │──▶│ security │            │
//!                         │  │ preflt │   │  table  │   │ sanitize │            │
//!                         │  └────────┘   └─────────┘   │ + inject │            │
//!                         │                             └────┬─────┘            │
//!                         │                                  ▼                  │
//!   Client Response       │  ┌────────┐              ┌──────────────┐           │
//!   ◀─────────────────────┼──│  cors  │◀─────────────│   forward    │◀──────────┼──── Provider API
//!                         │  │ stamp  │   streaming  │   (reqwest)  │           │
//!                         │  └────────┘              └──────────────┘           │
//!                         └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use credential_proxy::config::{load_config, ProxyConfig};
use credential_proxy::observability::logging;
use credential_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "credential-proxy")]
#[command(about = "Edge proxy that injects provider API keys into browser requests", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability);

    tracing::info!("credential-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        upstream_timeout_secs = config.timeouts.upstream_secs,
        require_secrets = config.secrets.require_present,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
