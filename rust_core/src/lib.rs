//! Crossbook Core - prediction-market feed normalization and aggregation.
//!
//! This module provides:
//! - One adapter per venue (Polymarket Gamma, Manifold) behind a common trait
//! - Ordered-fallback YES-probability extraction from raw records
//! - Polymarket link resolution (market slug, event slug, raw id, search)
//! - A settle-all aggregator that merges sources without short-circuiting

pub mod aggregate;
pub mod clients;
pub mod error;
pub mod links;
pub mod probability;
pub mod sources;
pub mod types;

pub use error::{AggregateError, SourceError};
pub use sources::{MarketSource, SourceRegistry};
pub use types::{AggregateFeed, MarketItem, Source, SourceFeed, SourceStatus};
