//! Polymarket source adapter
//!
//! Normalizes raw Gamma records: probability extraction, link
//! resolution, and the alias chains for question, volume, and close
//! time. Records without a usable question or probability are dropped.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::clients::PolymarketClient;
use crate::error::SourceError;
use crate::links;
use crate::probability;
use crate::sources::MarketSource;
use crate::types::{MarketItem, MarketLinks, Source};

pub struct PolymarketSource {
    client: PolymarketClient,
}

impl PolymarketSource {
    pub fn new() -> Self {
        Self {
            client: PolymarketClient::new(),
        }
    }

    /// Source backed by a specific client (tests)
    pub fn with_client(client: PolymarketClient) -> Self {
        Self { client }
    }
}

impl Default for PolymarketSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketSource for PolymarketSource {
    fn name(&self) -> &'static str {
        Source::Polymarket.as_str()
    }

    async fn fetch(&self) -> Result<Vec<MarketItem>, SourceError> {
        let records = self.client.fetch_open_markets().await?;
        let items: Vec<MarketItem> = records.iter().filter_map(record_to_item).collect();
        debug!(
            "Polymarket normalized {} of {} raw records",
            items.len(),
            records.len()
        );
        Ok(items)
    }
}

/// Normalize one raw Gamma record, or drop it.
fn record_to_item(record: &Value) -> Option<MarketItem> {
    let question = question_of(record);
    if question.is_empty() {
        return None;
    }
    let yes_prob = probability::extract_yes_prob(record)?;

    let ids = links::extract_link_ids(record);
    let link = links::resolve(&question, &ids);
    let event_slug = ids.event.clone();

    Some(MarketItem {
        question,
        yes_prob,
        source: Source::Polymarket,
        volume_24h: volume_of(record),
        close_time: close_time_of(record),
        url: link.url,
        links: Some(MarketLinks {
            market_url: link.market_url,
            event_url: link.event_url,
            link_type: link.link_type,
            link_ids: ids,
            event_slug,
        }),
    })
}

/// First present question alias, empty string when none.
///
/// Present-but-empty counts as present: an empty `question` field is
/// not papered over by a later alias.
fn question_of(record: &Value) -> String {
    ["question", "marketTitle", "title", "name"]
        .iter()
        .find_map(|key| record.get(*key).filter(|v| !v.is_null()))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// First present 24h-volume alias, 0.0 when it does not parse.
fn volume_of(record: &Value) -> f64 {
    ["volume24hr", "volume24Hr", "volume24hrClob", "volume24h"]
        .iter()
        .find_map(|key| record.get(*key).filter(|v| !v.is_null()))
        .and_then(probability::finite_number)
        .unwrap_or(0.0)
}

/// First present close-time alias, passed through untouched.
fn close_time_of(record: &Value) -> Option<Value> {
    ["endDate", "closeTime", "endTime"]
        .iter()
        .find_map(|key| record.get(*key).filter(|v| !v.is_null()))
        .cloned()
}
