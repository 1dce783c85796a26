//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the transactions handler
//! - Wire up middleware (tracing, timeout, request ID, CORS headers)
//! - Bind server to listener and serve until shutdown

use std::future::Future;
use std::time::Duration;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::http::handlers::{cross_chain_txn, CROSS_CHAIN_TXN_PATH};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::{cors_header_layer, cors_headers};
use crate::upstream::{TransactionClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: TransactionClient,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let state = AppState {
            upstream: TransactionClient::new(&config.upstream)?,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Every method on the path reaches the handler. CORS headers wrap the
    /// timeout so they land on every response, timeouts and 404s included.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let [origin, methods, headers] = cors_headers();

        Router::new()
            .route(CROSS_CHAIN_TXN_PATH, any(cross_chain_txn))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(cors_header_layer(origin))
                    .layer(cors_header_layer(methods))
                    .layer(cors_header_layer(headers))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// The fully layered router, e.g. for driving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Run the server on `listener` until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
