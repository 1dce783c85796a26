//! Cross-chain transaction proxy.
//!
//! ```text
//!     Client                 ┌──────────────────────────────────────┐
//!     GET /api/cross-chain-txn?address=…                            │
//!     ──────────────────────▶│  http::server  (request id, trace,   │
//!                            │                 CORS, timeout)       │
//!                            │        │                             │
//!                            │        ▼                             │
//!                            │  http::handlers ── 400 if no address │
//!                            │        │                             │
//!                            │        ▼                             │
//!                            │  upstream::client ─────────────────────────▶ transactions API
//!     ◀──────────────────────│  200 body verbatim / 500 on failure  │◀────────
//!                            └──────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cross_chain_txn_proxy::config::{load_config, validate_config, ConfigError, ProxyConfig};
use cross_chain_txn_proxy::http::HttpServer;
use cross_chain_txn_proxy::lifecycle::shutdown_signal;
use cross_chain_txn_proxy::observability::init_logging;

#[derive(Parser)]
#[command(name = "cross-chain-txn-proxy")]
#[command(about = "Relay cross-chain transaction history with CORS headers", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
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
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    init_logging(&config.observability);

    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );
    match config.to_toml() {
        Ok(rendered) => tracing::debug!(config = %rendered, "Effective configuration"),
        Err(e) => tracing::warn!(error = %e, "Failed to render effective configuration"),
    }

    let server = HttpServer::new(config)?;

    let listener = match TcpListener::bind(&server.config().listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                bind_address = %server.config().listener.bind_address,
                error = %e,
                "Failed to bind listener"
            );
            return Err(e.into());
        }
    };

    tracing::info!(address = %listener.local_addr()?, "Server is running");

    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
