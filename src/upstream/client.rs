//! Transaction-history API client.
//!
//! # Responsibilities
//! - Build the fixed upstream query for an address
//! - Issue one GET and hand back the raw body
//!
//! The status code is not inspected and the body is never parsed: whatever
//! the API sends is what the caller gets.

use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;

/// Path of the transactions listing on the upstream API.
pub const TRANSACTIONS_PATH: &str = "/api/h/atlas/transactions";

/// Fixed page size requested from the upstream API.
pub const PAGE_SIZE: u32 = 100;

/// Fixed page offset requested from the upstream API.
pub const PAGE_OFFSET: u32 = 0;

/// Errors reaching the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Base URL could not be turned into a transactions URL.
    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connect, DNS, TLS or timeout failure while sending.
    #[error("upstream request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Connection dropped or timed out while reading the body.
    #[error("failed to read upstream body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Client for the cross-chain transactions listing.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TransactionClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl TransactionClient {
    /// Create a client from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let endpoint = Url::parse(&config.base_url)?.join(TRANSACTIONS_PATH)?;

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build().map_err(UpstreamError::Client)?;

        tracing::debug!(endpoint = %endpoint, "Upstream client initialized");

        Ok(Self { http, endpoint })
    }

    /// The transactions endpoint without a query string.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the request URL for `address`.
    ///
    /// The address is form-encoded, so reserved characters cannot add
    /// parameters of their own.
    pub fn transactions_url(&self, address: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("first", &PAGE_SIZE.to_string())
            .append_pair("offset", &PAGE_OFFSET.to_string())
            .append_pair("sender", address);
        url
    }

    /// Fetch the raw transactions document for `address`.
    pub async fn fetch_transactions(&self, address: &str) -> Result<Bytes, UpstreamError> {
        let url = self.transactions_url(address);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(UpstreamError::Request)?;

        tracing::debug!(
            status = %response.status(),
            content_length = ?response.content_length(),
            "Upstream responded"
        );

        // Consumes the response; the connection is released on both arms.
        response.bytes().await.map_err(UpstreamError::Body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> TransactionClient {
        TransactionClient::new(&UpstreamConfig {
            base_url: base_url.to_string(),
            ..UpstreamConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn default_endpoint() {
        let client = client("https://ccip.chain.link");
        assert_eq!(
            client.endpoint().as_str(),
            "https://ccip.chain.link/api/h/atlas/transactions"
        );
    }

    #[test]
    fn url_carries_paging_and_sender() {
        let url = client("https://ccip.chain.link").transactions_url("0xABC");
        assert_eq!(
            url.as_str(),
            "https://ccip.chain.link/api/h/atlas/transactions?first=100&offset=0&sender=0xABC"
        );
        assert!(url.query().unwrap().contains("first=100&offset=0"));
    }

    #[test]
    fn reserved_characters_are_encoded() {
        let url = client("http://127.0.0.1:9000").transactions_url("0x1&first=1 x");
        assert_eq!(
            url.query(),
            Some("first=100&offset=0&sender=0x1%26first%3D1+x")
        );

        let senders: Vec<_> = url
            .query_pairs()
            .filter(|(k, _)| k == "sender")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(senders, vec!["0x1&first=1 x".to_string()]);
    }

    #[test]
    fn base_path_is_replaced() {
        let client = client("http://127.0.0.1:9000/ignored/");
        assert_eq!(client.endpoint().path(), TRANSACTIONS_PATH);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = TransactionClient::new(&UpstreamConfig {
            base_url: "not a url".to_string(),
            ..UpstreamConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidUrl(_)));
    }
}
