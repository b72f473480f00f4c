//! Marketing relay.
//!
//! A small HTTP service that relays marketing-automation requests to the
//! Loops contact/event API.
//!
//! # Routes
//!
//! ```text
//!   GET  /health                → { ok: true }
//!   POST /send/test             → upsert contact → send event → { ok, email, eventName, idempotencyKey, result }
//!   POST /jobs/attio/prospects  → 501 { ok: true, message: "not implemented" }
//!   *                           → 404 { ok: false, error: "not_found" }
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ─▶ http::server ─▶ routing ─▶ handlers ─▶ workflow ─▶ loops::client ─▶ Loops API
//!                 │                                                   │
//!                 └──────────── config / observability / lifecycle ───┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use marketing_relay::config::load_config;
use marketing_relay::lifecycle::signals::shutdown_on_signal;
use marketing_relay::observability::{logging, metrics};
use marketing_relay::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "marketing-relay")]
#[command(about = "Relays marketing-automation requests to the Loops API", long_about = None)]
struct Args {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("marketing-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        loops_base_url = %config.loops.base_url,
        default_event = %config.test_send.event_name,
        request_timeout_secs = config.timeouts.request_secs,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(error = %e, "Failed to start metrics exporter");
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
