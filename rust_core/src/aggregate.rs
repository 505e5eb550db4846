//! Merged fetch across every registered source
//!
//! Sources are fetched concurrently and each is allowed to settle: a
//! failed source is recorded and skipped, never short-circuiting its
//! siblings. Items are concatenated in registration order. Only the
//! case where every source failed is an error.

use std::collections::BTreeMap;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::error::AggregateError;
use crate::sources::SourceRegistry;
use crate::types::{AggregateFeed, MarketItem, SourceStatus};

/// Fetch every registered source and merge the results.
pub async fn fetch_all(registry: &SourceRegistry) -> Result<AggregateFeed, AggregateError> {
    let fetches = registry
        .sources()
        .iter()
        .map(|source| async move { (source.name(), source.fetch().await) });
    let settled = join_all(fetches).await;
    let total = settled.len();

    let mut items: Vec<MarketItem> = Vec::new();
    let mut sources: BTreeMap<String, SourceStatus> = BTreeMap::new();
    let mut failures: Vec<String> = Vec::new();

    for (name, result) in settled {
        match result {
            Ok(fetched) => {
                debug!("{} settled with {} items", name, fetched.len());
                sources.insert(name.to_string(), SourceStatus::Fulfilled);
                items.extend(fetched);
            }
            Err(err) => {
                warn!("{} fetch failed: {}", name, err);
                sources.insert(name.to_string(), SourceStatus::Rejected);
                failures.push(format!("{}: {}", name, err));
            }
        }
    }

    if total > 0 && failures.len() == total {
        return Err(AggregateError {
            detail: failures.join("; "),
        });
    }

    Ok(AggregateFeed {
        count: items.len(),
        items,
        sources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::sources::MarketSource;
    use crate::types::{MarketItem, Source};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StaticSource {
        name: &'static str,
        items: Vec<MarketItem>,
    }

    #[async_trait]
    impl MarketSource for StaticSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self) -> Result<Vec<MarketItem>, SourceError> {
            Ok(self.items.clone())
        }
    }

    struct FailingSource {
        name: &'static str,
        error: SourceError,
    }

    #[async_trait]
    impl MarketSource for FailingSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self) -> Result<Vec<MarketItem>, SourceError> {
            Err(self.error.clone())
        }
    }

    fn item(question: &str) -> MarketItem {
        MarketItem {
            question: question.to_string(),
            yes_prob: 0.5,
            source: Source::Manifold,
            volume_24h: 0.0,
            close_time: None,
            url: format!("https://example.com/{}", question),
            links: None,
        }
    }

    fn registry_of(sources: Vec<Arc<dyn MarketSource>>) -> SourceRegistry {
        let mut registry = SourceRegistry::new();
        for source in sources {
            registry.register(source);
        }
        registry
    }

    #[tokio::test]
    async fn test_merge_keeps_registration_order() {
        let registry = registry_of(vec![
            Arc::new(StaticSource {
                name: "polymarket",
                items: vec![item("a1"), item("a2")],
            }),
            Arc::new(StaticSource {
                name: "manifold",
                items: vec![item("b1")],
            }),
        ]);

        let feed = fetch_all(&registry).await.unwrap();
        assert_eq!(feed.count, 3);
        let questions: Vec<&str> = feed.items.iter().map(|i| i.question.as_str()).collect();
        assert_eq!(questions, vec!["a1", "a2", "b1"]);
        assert_eq!(feed.sources["polymarket"], SourceStatus::Fulfilled);
        assert_eq!(feed.sources["manifold"], SourceStatus::Fulfilled);
    }

    #[tokio::test]
    async fn test_failed_source_is_rejected_not_omitted() {
        let registry = registry_of(vec![
            Arc::new(FailingSource {
                name: "polymarket",
                error: SourceError::Timeout {
                    provider: "polymarket",
                    timeout_secs: 12,
                },
            }),
            Arc::new(StaticSource {
                name: "manifold",
                items: vec![item("b1"), item("b2"), item("b3")],
            }),
        ]);

        let feed = fetch_all(&registry).await.unwrap();
        assert_eq!(feed.count, 3);
        assert_eq!(feed.sources["polymarket"], SourceStatus::Rejected);
        assert_eq!(feed.sources["manifold"], SourceStatus::Fulfilled);
    }

    #[tokio::test]
    async fn test_empty_source_is_still_fulfilled() {
        let registry = registry_of(vec![Arc::new(StaticSource {
            name: "manifold",
            items: vec![],
        })]);

        let feed = fetch_all(&registry).await.unwrap();
        assert_eq!(feed.count, 0);
        assert_eq!(feed.sources["manifold"], SourceStatus::Fulfilled);
    }

    #[tokio::test]
    async fn test_all_failed_is_an_error() {
        let registry = registry_of(vec![
            Arc::new(FailingSource {
                name: "polymarket",
                error: SourceError::UpstreamStatus {
                    provider: "polymarket",
                    status: 500,
                },
            }),
            Arc::new(FailingSource {
                name: "manifold",
                error: SourceError::transport("manifold", "connection refused"),
            }),
        ]);

        let err = fetch_all(&registry).await.unwrap_err();
        assert!(err.detail.contains("polymarket"));
        assert!(err.detail.contains("manifold"));
    }
}
