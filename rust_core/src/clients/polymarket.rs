use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use tokio::time;

use crate::clients::{records_or_empty, FETCH_LIMIT, FETCH_TIMEOUT};
use crate::error::SourceError;
use crate::types::Source;

const GAMMA_API: &str = "https://gamma-api.polymarket.com/markets";

const PROVIDER: &str = Source::Polymarket.as_str();

/// Client-identification header sent to Gamma
const FEED_USER_AGENT: &str = concat!("crossbook-feed/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct PolymarketClient {
    client: Client,
    base_url: String,
}

impl PolymarketClient {
    pub fn new() -> Self {
        Self::with_base_url(GAMMA_API)
    }

    /// Client pointed at a non-default markets endpoint (tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch open markets from the Gamma API.
    ///
    /// One bounded attempt: the deadline covers connection through the
    /// decoded body, and hitting it abandons the request.
    pub async fn fetch_open_markets(&self) -> Result<Vec<Value>, SourceError> {
        match time::timeout(FETCH_TIMEOUT, self.request_markets()).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout {
                provider: PROVIDER,
                timeout_secs: FETCH_TIMEOUT.as_secs(),
            }),
        }
    }

    async fn request_markets(&self) -> Result<Vec<Value>, SourceError> {
        debug!("Fetching open markets from {}", self.base_url);

        let params = [
            ("closed", "false".to_string()),
            ("limit", FETCH_LIMIT.to_string()),
        ];

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .header("accept", "application/json")
            .header("cache-control", "no-store")
            .header("user-agent", FEED_USER_AGENT)
            .send()
            .await
            .map_err(|e| SourceError::transport(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            error!("Gamma API returned status {}", status);
            return Err(SourceError::UpstreamStatus {
                provider: PROVIDER,
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::transport(PROVIDER, e))?;

        Ok(records_or_empty(PROVIDER, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> PolymarketClient {
        PolymarketClient::with_base_url(format!("{}/markets", server.uri()))
    }

    #[tokio::test]
    async fn test_fetch_sends_expected_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/markets"))
            .and(query_param("closed", "false"))
            .and(query_param("limit", "200"))
            .and(header("accept", "application/json"))
            .and(header("cache-control", "no-store"))
            .and(header("user-agent", FEED_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "1" }
            ])))
            .mount(&server)
            .await;

        let records = test_client(&server).fetch_open_markets().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], "1");
    }

    #[tokio::test]
    async fn test_upstream_status_is_preserved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/markets"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = test_client(&server).fetch_open_markets().await.unwrap_err();
        assert_eq!(
            err,
            SourceError::UpstreamStatus {
                provider: "polymarket",
                status: 503,
            }
        );
    }

    #[tokio::test]
    async fn test_non_array_body_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/markets"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
            )
            .mount(&server)
            .await;

        let records = test_client(&server).fetch_open_markets().await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/markets"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_secs(30)),
            )
            .mount(&server)
            .await;

        let err = test_client(&server).fetch_open_markets().await.unwrap_err();
        assert!(matches!(err, SourceError::Timeout { timeout_secs: 12, .. }));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport() {
        let client = PolymarketClient::with_base_url("http://127.0.0.1:9/markets");
        let err = client.fetch_open_markets().await.unwrap_err();
        assert!(matches!(err, SourceError::Transport { .. }));
        assert_eq!(err.provider(), "polymarket");
    }
}
