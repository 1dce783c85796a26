//! Response construction.
//!
//! # Responsibilities
//! - Permissive CORS headers applied to every response
//! - Map handler errors to status codes and fixed plain-text bodies
//!
//! # Design Decisions
//! - Error detail is logged by the handler, never written to the client
//! - Error bodies mirror a plain "error text" responder: text/plain with
//!   `X-Content-Type-Options: nosniff`

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::upstream::UpstreamError;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// The three CORS headers, in the order they are applied.
pub fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ),
    ]
}

/// Layer setting one CORS header on every response.
pub fn cors_header_layer(
    (name, value): (HeaderName, HeaderValue),
) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, value)
}

/// Errors surfaced to API callers.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// `address` query parameter absent or empty.
    #[error("Address is required")]
    MissingAddress,

    /// Upstream API could not be reached or read.
    #[error("Failed to get cross chain txn")]
    Upstream(#[from] UpstreamError),
}

impl ProxyError {
    /// HTTP status written for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingAddress => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            self.to_string(),
        )
            .into_response()
    }
}
