//! Cross-chain transaction proxy library.
//!
//! One endpoint, `GET /api/cross-chain-txn?address=<value>`, relayed to the
//! upstream transaction-history API with permissive CORS headers added.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use upstream::TransactionClient;
