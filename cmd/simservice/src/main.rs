//! simservice - HTTP server for named SimHash stores.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use giztoy_simhash::{DEFAULT_THRESHOLD, SimHashEngine};
use giztoy_simservice::{DEFAULT_ADDR, DEFAULT_MAX_BODY, ServiceConfig, SimService, router};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// HTTP server for named SimHash stores.
///
/// Routes:
///   POST   /create?name=...                 create stores
///   DELETE /delete?name=...                 delete stores
///   POST   /insert name, id..., content...  insert rows into one store
///   GET    /consensus?name=...              representative and outlier ids
#[derive(Parser, Debug)]
#[command(name = "simservice")]
#[command(about = "HTTP server for named SimHash stores")]
#[command(version)]
struct Args {
    /// Listen address (e.g. 127.0.0.1:8080 or :8080)
    #[arg(long, default_value = DEFAULT_ADDR)]
    addr: String,

    /// Listen on all interfaces at this port (overrides --addr)
    #[arg(short, long)]
    port: Option<u16>,

    /// Max request body size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_BODY)]
    max_body: usize,

    /// Max differing bits for two entries to count as neighbors
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: u32,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> ServiceConfig {
        let cfg = ServiceConfig::default()
            .with_addr(&self.addr)
            .with_max_body(self.max_body);
        match self.port {
            Some(port) => cfg.with_port(port),
            None => cfg,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let config = args.config();
    let engine = SimHashEngine::new(args.threshold)?;
    let addr = config
        .socket_addr()
        .with_context(|| format!("invalid listen address: {}", config.addr))?;

    info!(?engine, max_body = config.max_body_bytes, "starting sim service");
    let service = Arc::new(SimService::new(config, engine));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, router(service.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    service.shutdown();
    info!("sim service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
