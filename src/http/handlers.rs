//! Request handlers.

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};

use crate::http::request::request_id;
use crate::http::response::ProxyError;
use crate::http::server::AppState;

/// Path the transactions handler is mounted on.
pub const CROSS_CHAIN_TXN_PATH: &str = "/api/cross-chain-txn";

/// Relay the upstream transactions document for `?address=`.
pub async fn cross_chain_txn(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    let request_id = request_id(&headers);

    let Some(address) = address_param(query.as_deref()) else {
        tracing::debug!(request_id = %request_id, "Rejecting request without address");
        return Err(ProxyError::MissingAddress);
    };

    tracing::debug!(request_id = %request_id, address = %address, "Fetching cross chain txns");

    let body = state
        .upstream
        .fetch_transactions(&address)
        .await
        .map_err(|e| {
            tracing::error!(
                request_id = %request_id,
                address = %address,
                error = %e,
                "Upstream error"
            );
            ProxyError::from(e)
        })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// First well-formed `address` value in the query string, if non-empty.
///
/// Pairs containing `;` or a broken `%XX` escape are skipped entirely, so a
/// malformed `address` counts as absent.
fn address_param(query: Option<&str>) -> Option<String> {
    query?
        .split('&')
        .filter(|pair| !pair.contains(';') && has_valid_escapes(pair))
        .flat_map(|pair| url::form_urlencoded::parse(pair.as_bytes()))
        .find(|(key, _)| key == "address")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Every `%` is followed by two hex digits.
fn has_valid_escapes(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3);
            if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::{address_param, has_valid_escapes};

    #[test]
    fn no_query() {
        assert_eq!(address_param(None), None);
    }

    #[test]
    fn empty_value() {
        assert_eq!(address_param(Some("address=")), None);
        assert_eq!(address_param(Some("address")), None);
    }

    #[test]
    fn other_params_ignored() {
        assert_eq!(address_param(Some("foo=bar")), None);
        assert_eq!(
            address_param(Some("foo=bar&address=0xABC")),
            Some("0xABC".to_string())
        );
    }

    #[test]
    fn first_occurrence_wins() {
        assert_eq!(
            address_param(Some("address=0x1&address=0x2")),
            Some("0x1".to_string())
        );
        assert_eq!(address_param(Some("address=&address=0x2")), None);
    }

    #[test]
    fn value_is_decoded() {
        assert_eq!(
            address_param(Some("address=0x1%26b+c")),
            Some("0x1&b c".to_string())
        );
    }

    #[test]
    fn malformed_address_counts_as_absent() {
        assert_eq!(address_param(Some("address=0x%zz")), None);
        assert_eq!(address_param(Some("address=0x%4")), None);
        assert_eq!(address_param(Some("address=0xABC;x=1")), None);
        assert_eq!(address_param(Some("x=1;address=0xABC")), None);
    }

    #[test]
    fn malformed_pairs_are_skipped_not_fatal() {
        assert_eq!(
            address_param(Some("address=0x%zz&address=0xABC")),
            Some("0xABC".to_string())
        );
        assert_eq!(
            address_param(Some("foo=a;b&address=0xABC")),
            Some("0xABC".to_string())
        );
    }

    #[test]
    fn escape_check() {
        assert!(has_valid_escapes("0x%2Fab"));
        assert!(has_valid_escapes("plain"));
        assert!(!has_valid_escapes("%"));
        assert!(!has_valid_escapes("ab%g1"));
    }
}
