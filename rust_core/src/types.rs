//! Canonical feed records and response envelopes
//!
//! Every source adapter normalizes its venue's raw records into the
//! `MarketItem` shape below. Field names follow the camelCase wire
//! format the feed's consumers already depend on.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Venue a market item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Polymarket,
    Manifold,
}

impl Source {
    /// Registry and wire name for this venue
    pub const fn as_str(self) -> &'static str {
        match self {
            Source::Polymarket => "polymarket",
            Source::Manifold => "manifold",
        }
    }
}

/// Link-resolution tier that produced a Polymarket item's `url`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Direct market page, keyed by market slug or raw id
    Market,

    /// Event page, with the market slug appended when known
    Event,

    /// Site search over the question text (guaranteed fallback)
    Search,
}

/// Raw identifier triple a Polymarket link was resolved from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkIds {
    /// Market slug
    pub market: Option<String>,

    /// Event (collection) slug
    pub event: Option<String>,

    /// Opaque market id, rendered as a string when the venue sends a number
    pub id: Option<String>,
}

/// Polymarket-only link detail, flattened into the item on the wire
///
/// Manifold items carry none of these keys: that venue returns a direct
/// `url` per market, so there is nothing to resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketLinks {
    /// Market-detail URL, when a market slug or raw id exists
    pub market_url: Option<String>,

    /// Event URL, when an event slug exists
    pub event_url: Option<String>,

    /// Tier that produced the item's `url`
    pub link_type: LinkType,

    /// Identifiers the tiers were resolved from
    pub link_ids: LinkIds,

    /// Event slug, mirrored at the top level for grouping clients
    pub event_slug: Option<String>,
}

/// One normalized binary-outcome market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketItem {
    /// Market question text; emitted items always have a non-empty one
    pub question: String,

    /// Implied probability of the YES outcome
    ///
    /// Passed through exactly as extracted: the feed does not clamp to
    /// [0, 1], only finite values survive extraction.
    pub yes_prob: f64,

    /// Venue this item came from
    pub source: Source,

    /// Trading volume over the last 24h, 0.0 when the venue reports none
    pub volume_24h: f64,

    /// Close/end time exactly as the venue reported it: ISO-8601 string
    /// for Polymarket, epoch milliseconds for Manifold
    pub close_time: Option<Value>,

    /// Best navigable link for this market
    pub url: String,

    /// Polymarket link detail; absent for venues with direct URLs
    #[serde(flatten)]
    pub links: Option<MarketLinks>,
}

/// Response body for a single-source fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFeed {
    pub count: usize,
    pub items: Vec<MarketItem>,
}

/// Settle outcome of one source within a merged fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Fulfilled,
    Rejected,
}

/// Response body for the merged feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateFeed {
    pub count: usize,
    pub items: Vec<MarketItem>,

    /// Per-source settle status, keyed by registry name
    pub sources: BTreeMap<String, SourceStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn polymarket_item() -> MarketItem {
        MarketItem {
            question: "Will it rain tomorrow?".to_string(),
            yes_prob: 0.61,
            source: Source::Polymarket,
            volume_24h: 1234.5,
            close_time: Some(json!("2026-01-01T00:00:00Z")),
            url: "https://polymarket.com/market/rain-tomorrow".to_string(),
            links: Some(MarketLinks {
                market_url: Some("https://polymarket.com/market/rain-tomorrow".to_string()),
                event_url: None,
                link_type: LinkType::Market,
                link_ids: LinkIds {
                    market: Some("rain-tomorrow".to_string()),
                    event: None,
                    id: Some("123".to_string()),
                },
                event_slug: None,
            }),
        }
    }

    #[test]
    fn test_source_serialization() {
        assert_eq!(
            serde_json::to_string(&Source::Polymarket).unwrap(),
            "\"polymarket\""
        );
        assert_eq!(
            serde_json::to_string(&Source::Manifold).unwrap(),
            "\"manifold\""
        );
        assert_eq!(Source::Polymarket.as_str(), "polymarket");
    }

    #[test]
    fn test_polymarket_item_wire_shape() {
        let value = serde_json::to_value(polymarket_item()).unwrap();

        assert_eq!(value["question"], "Will it rain tomorrow?");
        assert_eq!(value["yesProb"], 0.61);
        assert_eq!(value["source"], "polymarket");
        assert_eq!(value["volume24h"], 1234.5);
        // Link detail is flattened into the item, not nested
        assert_eq!(value["linkType"], "market");
        assert_eq!(value["linkIds"]["market"], "rain-tomorrow");
        assert_eq!(value["eventUrl"], Value::Null);
        assert!(value.get("links").is_none());
    }

    #[test]
    fn test_manifold_item_omits_link_detail() {
        let item = MarketItem {
            question: "Will X ship this year?".to_string(),
            yes_prob: 0.4,
            source: Source::Manifold,
            volume_24h: 0.0,
            close_time: None,
            url: "https://manifold.markets/x/will-x-ship".to_string(),
            links: None,
        };

        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("linkType").is_none());
        assert!(value.get("marketUrl").is_none());
        // closeTime stays on the wire as an explicit null
        assert_eq!(value["closeTime"], Value::Null);
        assert!(value.as_object().unwrap().contains_key("closeTime"));
    }

    #[test]
    fn test_item_round_trip() {
        let item = polymarket_item();
        let json = serde_json::to_string(&item).unwrap();
        let back: MarketItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_aggregate_feed_statuses() {
        let mut sources = BTreeMap::new();
        sources.insert("manifold".to_string(), SourceStatus::Fulfilled);
        sources.insert("polymarket".to_string(), SourceStatus::Rejected);

        let feed = AggregateFeed {
            count: 0,
            items: vec![],
            sources,
        };

        let value = serde_json::to_value(&feed).unwrap();
        assert_eq!(value["sources"]["manifold"], "fulfilled");
        assert_eq!(value["sources"]["polymarket"], "rejected");
    }
}
