use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use tokio::time;

use crate::clients::{records_or_empty, FETCH_LIMIT, FETCH_TIMEOUT};
use crate::error::SourceError;
use crate::types::Source;

const MANIFOLD_API: &str = "https://api.manifold.markets/v0/markets";

const PROVIDER: &str = Source::Manifold.as_str();

#[derive(Debug, Clone)]
pub struct ManifoldClient {
    client: Client,
    base_url: String,
}

impl ManifoldClient {
    pub fn new() -> Self {
        Self::with_base_url(MANIFOLD_API)
    }

    /// Client pointed at a non-default markets endpoint (tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch recent markets from the Manifold API.
    ///
    /// Same contract as the Polymarket client: one bounded attempt, no
    /// retries.
    pub async fn fetch_markets(&self) -> Result<Vec<Value>, SourceError> {
        match time::timeout(FETCH_TIMEOUT, self.request_markets()).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout {
                provider: PROVIDER,
                timeout_secs: FETCH_TIMEOUT.as_secs(),
            }),
        }
    }

    async fn request_markets(&self) -> Result<Vec<Value>, SourceError> {
        debug!("Fetching markets from {}", self.base_url);

        let params = [("limit", FETCH_LIMIT.to_string())];

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .header("accept", "application/json")
            .header("cache-control", "no-store")
            .send()
            .await
            .map_err(|e| SourceError::transport(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            error!("Manifold API returned status {}", status);
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
