//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handlers.rs (extract address, call upstream)
//!     → response.rs (CORS headers, error mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use handlers::CROSS_CHAIN_TXN_PATH;
pub use request::X_REQUEST_ID;
pub use response::ProxyError;
pub use server::{AppState, HttpServer};
