//! Manifold source adapter
//!
//! Manifold's listing is simpler than Gamma's: records carry a direct
//! `url` and a single `probability` field. The adapter pre-filters to
//! open binary markets before normalizing.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::clients::ManifoldClient;
use crate::error::SourceError;
use crate::probability;
use crate::sources::MarketSource;
use crate::types::{MarketItem, Source};

pub struct ManifoldSource {
    client: ManifoldClient,
}

impl ManifoldSource {
    pub fn new() -> Self {
        Self {
            client: ManifoldClient::new(),
        }
    }

    /// Source backed by a specific client (tests)
    pub fn with_client(client: ManifoldClient) -> Self {
        Self { client }
    }
}

impl Default for ManifoldSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketSource for ManifoldSource {
    fn name(&self) -> &'static str {
        Source::Manifold.as_str()
    }

    async fn fetch(&self) -> Result<Vec<MarketItem>, SourceError> {
        let records = self.client.fetch_markets().await?;
        let items: Vec<MarketItem> = records
            .iter()
            .filter(|record| is_open_binary(record))
            .filter_map(record_to_item)
            .collect();
        debug!(
            "Manifold normalized {} of {} raw records",
            items.len(),
            records.len()
        );
        Ok(items)
    }
}

/// Keep only unresolved binary markets. A missing `isResolved` counts
/// as open.
fn is_open_binary(record: &Value) -> bool {
    let binary = record.get("outcomeType").and_then(Value::as_str) == Some("BINARY");
    let resolved = record
        .get("isResolved")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    binary && !resolved
}

/// Normalize one raw Manifold record, or drop it.
fn record_to_item(record: &Value) -> Option<MarketItem> {
    let question = record
        .get("question")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    if question.is_empty() {
        return None;
    }
    let yes_prob = probability::probability_field(record)?;

    let url = record
        .get("url")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(MarketItem {
        question,
        yes_prob,
        source: Source::Manifold,
        volume_24h: volume_of(record),
        close_time: close_time_of(record),
        url,
        links: None,
    })
}

fn volume_of(record: &Value) -> f64 {
    record
        .get("volume24Hours")
        .and_then(probability::finite_number)
        .unwrap_or(0.0)
}

fn close_time_of(record: &Value) -> Option<Value> {
    record.get("closeTime").filter(|v| !v.is_null()).cloned()
}
