//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers, upstream client, server lifecycle
//!     → tracing events (request ID as a field)
//!     → logging.rs subscriber (stdout, pretty or JSON)
//! ```

pub mod logging;

pub use logging::init_logging;
