//! Upstream API subsystem.
//!
//! # Data Flow
//! ```text
//! address (opaque string)
//!     → client.rs (build fixed query, GET)
//!     → raw body bytes or UpstreamError
//! ```

pub mod client;

pub use client::{TransactionClient, UpstreamError};
