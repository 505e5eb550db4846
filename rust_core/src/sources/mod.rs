//! Market sources: venue adapters behind one trait
//!
//! A source owns a client and turns the venue's raw records into
//! normalized `MarketItem`s. The aggregator only sees this trait.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::types::MarketItem;

pub mod manifold;
pub mod polymarket;
pub mod registry;

// Re-export commonly used types
pub use manifold::ManifoldSource;
pub use polymarket::PolymarketSource;
pub use registry::SourceRegistry;

/// One upstream venue, normalized
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Stable registry name, also the wire name in merged responses
    fn name(&self) -> &'static str;

    /// Fetch and normalize the venue's current markets.
    ///
    /// One bounded request, no retries. A failure here never affects
    /// sibling sources; the aggregator records it per source.
    async fn fetch(&self) -> Result<Vec<MarketItem>, SourceError>;
}
