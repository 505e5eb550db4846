//! Polymarket link resolution
//!
//! Gamma records identify a market three different ways, none reliably
//! present: a market slug, an event (collection) slug, and an opaque
//! numeric id. Resolution ranks them market slug, then event slug, then
//! raw id, and falls back to a site search over the question text so
//! every item ends up with a navigable `url`. The companion market and
//! event URLs are computed independently and kept regardless of which
//! tier won.

use serde_json::Value;

use crate::types::{LinkIds, LinkType};

const POLYMARKET_SITE: &str = "https://polymarket.com";

/// Result of ranking one record's identifiers
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLink {
    /// Best navigable link (the winning tier)
    pub url: String,

    /// Market-detail URL, whenever a market slug or raw id exists
    pub market_url: Option<String>,

    /// Event URL, whenever an event slug exists
    pub event_url: Option<String>,

    /// Tier that produced `url`
    pub link_type: LinkType,
}

/// Pull the identifier triple out of a raw Gamma record.
///
/// Each identifier has aliases; the first non-empty one wins. Numeric
/// ids are rendered as strings.
pub fn extract_link_ids(record: &Value) -> LinkIds {
    let market = non_empty_string(record.get("slug"))
        .or_else(|| non_empty_string(record.get("marketSlug")));

    let event = non_empty_string(record.get("collectionSlug"))
        .or_else(|| non_empty_string(record.get("eventSlug")))
        .or_else(|| non_empty_string(record.pointer("/event/slug")))
        .or_else(|| non_empty_string(record.pointer("/event/collectionSlug")))
        .or_else(|| non_empty_string(record.pointer("/collection/slug")));

    let id = id_string(record.get("id")).or_else(|| id_string(record.get("marketId")));

    LinkIds { market, event, id }
}

/// Rank the identifiers and build every URL they support.
pub fn resolve(question: &str, ids: &LinkIds) -> ResolvedLink {
    let market_url = match (&ids.market, &ids.id) {
        (Some(slug), _) => Some(format!("{}/market/{}", POLYMARKET_SITE, slug)),
        (None, Some(id)) => Some(format!("{}/market/{}", POLYMARKET_SITE, id)),
        (None, None) => None,
    };

    let event_url = match (&ids.event, &ids.market) {
        (Some(event), Some(market)) => {
            Some(format!("{}/event/{}/{}", POLYMARKET_SITE, event, market))
        }
        (Some(event), None) => Some(format!("{}/event/{}", POLYMARKET_SITE, event)),
        (None, _) => None,
    };

    let (url, link_type) = if let (Some(_), Some(market)) = (&ids.market, &market_url) {
        (market.clone(), LinkType::Market)
    } else if let Some(event) = &event_url {
        (event.clone(), LinkType::Event)
    } else if let Some(market) = &market_url {
        (market.clone(), LinkType::Market)
    } else {
        (search_url(question), LinkType::Search)
    };

    ResolvedLink {
        url,
        market_url,
        event_url,
        link_type,
    }
}

fn search_url(question: &str) -> String {
    format!(
        "{}/search?query={}",
        POLYMARKET_SITE,
        urlencoding::encode(question)
    )
}

/// Non-empty string field, or nothing.
fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Id field as a string: non-empty strings pass through, numbers are
/// rendered.
fn id_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
