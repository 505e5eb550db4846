//! YES-probability extraction from raw venue records
//!
//! Venues disagree about where the price of the YES outcome lives, and
//! the same venue varies it across market kinds. Extraction runs an
//! ordered list of strategies and takes the first that yields a finite
//! number; a record none of them understands carries no usable price
//! and is dropped by the adapter.

use serde_json::Value;

type Strategy = fn(&Value) -> Option<f64>;

/// Strategies in precedence order. Earlier entries are the venue's
/// more authoritative representations of the YES price.
const STRATEGIES: &[Strategy] = &[
    outcome_pair_price,
    yes_price,
    last_trade_price,
    bid_ask_midpoint,
    probability_field,
];

/// Extract the implied YES probability from a raw market record.
///
/// Returns the first strategy hit, unclamped. `None` means no strategy
/// produced a finite number.
pub fn extract_yes_prob(record: &Value) -> Option<f64> {
    STRATEGIES.iter().find_map(|strategy| strategy(record))
}

/// Price aligned with the YES entry of an outcomes/prices pair.
///
/// Both arrays may arrive JSON-encoded inside strings; the YES label is
/// matched case-insensitively.
fn outcome_pair_price(record: &Value) -> Option<f64> {
    let outcomes = string_or_array(record.get("outcomes")?)?;
    let prices = string_or_array(record.get("outcomePrices")?)?;

    let idx = outcomes
        .iter()
        .position(|o| o.as_str().is_some_and(|s| s.eq_ignore_ascii_case("yes")))?;

    finite_number(prices.get(idx)?)
}

fn yes_price(record: &Value) -> Option<f64> {
    finite_json_number(record.get("yesPrice")?)
}

fn last_trade_price(record: &Value) -> Option<f64> {
    finite_json_number(record.get("lastTradePrice")?)
}

/// Midpoint of best bid and best ask; requires both sides.
fn bid_ask_midpoint(record: &Value) -> Option<f64> {
    let bid = finite_json_number(record.get("bestBid")?)?;
    let ask = finite_json_number(record.get("bestAsk")?)?;
    let mid = (bid + ask) / 2.0;
    mid.is_finite().then_some(mid)
}

/// Direct probability field. Last in the Polymarket chain, the only
/// representation Manifold uses.
pub fn probability_field(record: &Value) -> Option<f64> {
    finite_json_number(record.get("probability")?)
}

/// Array either in place or JSON-encoded inside a string.
fn string_or_array(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items.clone()),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

/// Finite number from a JSON number or a numeric string.
pub(crate) fn finite_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Finite number from a JSON number only. Strategies past the outcome
/// pair do not accept numeric strings.
fn finite_json_number(value: &Value) -> Option<f64> {
    let n = value.as_f64()?;
    n.is_finite().then_some(n)
}
