//! Registry of market sources
//!
//! Sources are kept in registration order, which fixes the merge order
//! of the aggregate feed.

use std::sync::Arc;

use tracing::info;

use crate::sources::{ManifoldSource, MarketSource, PolymarketSource};

pub struct SourceRegistry {
    sources: Vec<Arc<dyn MarketSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Registry with the default production sources
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PolymarketSource::new()));
        registry.register(Arc::new(ManifoldSource::new()));
        info!(
            "SourceRegistry initialized with {} sources",
            registry.sources.len()
        );
        registry
    }

    pub fn register(&mut self, source: Arc<dyn MarketSource>) {
        info!("Registering market source: {}", source.name());
        self.sources.push(source);
    }

    /// Look a source up by its registry name
    pub fn get(&self, name: &str) -> Option<Arc<dyn MarketSource>> {
        self.sources
            .iter()
            .find(|source| source.name() == name)
            .cloned()
    }

    /// Registered sources in registration order (merge order)
    pub fn sources(&self) -> &[Arc<dyn MarketSource>] {
        &self.sources
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
