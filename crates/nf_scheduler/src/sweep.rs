//! One full pass over the configured sources.
//!
//! Sources are crawled sequentially and each one is its own failure domain:
//! a bad strategy identifier, an unreachable listing page or a source-wide
//! parse problem is logged and skipped, never propagated. Within a source,
//! hydration failures drop the single stub and keep the rest of the batch.

use nf_core::{dedup, ConfigStore, EventSink, SourceConfig};
use nf_extract::StrategyRegistry;

/// Counters for one sweep, logged at the end of every cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Sources crawled to completion.
    pub sources: usize,
    /// Sources skipped: disabled, misconfigured or failed.
    pub skipped: usize,
    /// Stubs found on listing pages.
    pub listed: usize,
    /// Stubs that survived the dedup filter.
    pub fresh: usize,
    /// Articles hydrated and handed to the sink.
    pub saved: usize,
}

pub(crate) async fn sweep(
    configs: &dyn ConfigStore,
    sink: &dyn EventSink,
    registry: &StrategyRegistry,
) -> SweepStats {
    let mut stats = SweepStats::default();

    let configs = match configs.list_all().await {
        Ok(configs) => configs,
        Err(e) => {
            tracing::error!(error = %e, "failed to list source configs");
            return stats;
        }
    };

    for config in configs {
        if !config.enabled {
            tracing::debug!(source = %config.name, "source disabled, skipping");
            stats.skipped += 1;
            continue;
        }
        match crawl_source(&config, sink, registry).await {
            Ok((listed, fresh, saved)) => {
                stats.sources += 1;
                stats.listed += listed;
                stats.fresh += fresh;
                stats.saved += saved;
            }
            Err(e) => {
                tracing::warn!(source = %config.name, error = %e, "source skipped this cycle");
                stats.skipped += 1;
            }
        }
    }

    stats
}

async fn crawl_source(
    config: &SourceConfig,
    sink: &dyn EventSink,
    registry: &StrategyRegistry,
) -> nf_core::Result<(usize, usize, usize)> {
    let strategy = registry.resolve(&config.strategy)?;

    tracing::info!(source = %config.name, "reading listing page");
    let stubs = strategy.list_stubs(config).await?;
    let listed = stubs.len();
    tracing::info!(source = %config.name, count = listed, "read titles");

    let known = sink.known_keys(config).await?;
    let fresh = dedup::filter_new(stubs, &known);
    tracing::info!(source = %config.name, count = fresh.len(), "new items after dedup");

    let mut articles = Vec::with_capacity(fresh.len());
    for stub in &fresh {
        match strategy.hydrate(stub, config).await {
            Ok(article) => articles.push(article),
            Err(e) => {
                tracing::warn!(source = %config.name, url = %stub.url, error = %e, "stub dropped")
            }
        }
    }

    let saved = articles.len();
    if !articles.is_empty() {
        sink.save(articles, config).await?;
    }
    Ok((listed, fresh.len(), saved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use nf_core::{Article, ArticleStub, Error, Result, SourceConfig};
    use nf_extract::Strategy;
    use nf_storage::{MemoryConfigStore, MemoryEventStore};

    fn config(name: &str) -> SourceConfig {
        SourceConfig {
            name: name.to_string(),
            root_url: format!("https://{name}.example"),
            listing_path: "/news/".to_string(),
            strategy: "mock".to_string(),
            enabled: true,
        }
    }

    fn stub(url: &str) -> ArticleStub {
        ArticleStub {
            title: url.to_string(),
            url: url.to_string(),
            listed_time: None,
        }
    }

    /// Canned strategy: per-source listings, plus URL markers that make the
    /// listing or a single hydrate fail.
    struct MockStrategy;

    #[async_trait]
    impl Strategy for MockStrategy {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn list_stubs(&self, config: &SourceConfig) -> Result<Vec<ArticleStub>> {
            if config.name.contains("unreachable") {
                return Err(Error::Parse(format!("listing down for {}", config.name)));
            }
            Ok((1..=3)
                .map(|i| stub(&format!("{}/news/{i}", config.root_url)))
                .collect())
        }

        async fn hydrate(&self, stub: &ArticleStub, config: &SourceConfig) -> Result<Article> {
            if stub.url.ends_with("/news/3") && config.name.contains("flaky") {
                return Err(Error::Parse(format!("detail page broken: {}", stub.url)));
            }
            Ok(Article {
                source: config.name.clone(),
                title: stub.title.clone(),
                url: stub.url.clone(),
                published_at: Utc::now(),
                body: format!("hydrated text for {}", stub.url),
                summary: None,
            })
        }
    }

    fn mock_registry() -> StrategyRegistry {
        let mut registry = StrategyRegistry::new();
        registry.register("mock", Box::new(|| Ok(Box::new(MockStrategy))));
        registry
    }

    #[tokio::test]
    async fn test_known_items_are_not_rehydrated() {
        let config = config("a");
        let configs = MemoryConfigStore::new(vec![config.clone()]);
        let sink = MemoryEventStore::new();

        // One of the three listed items is already persisted.
        sink.save(
            vec![Article {
                source: "a".to_string(),
                title: "old".to_string(),
                url: "https://a.example/news/2".to_string(),
                published_at: Utc::now(),
                body: "old".to_string(),
                summary: None,
            }],
            &config,
        )
        .await
        .unwrap();

        let stats = sweep(&configs, &sink, &mock_registry()).await;
        assert_eq!(stats.listed, 3);
        assert_eq!(stats.fresh, 2);
        assert_eq!(stats.saved, 2);

        let articles = sink.articles().await;
        assert_eq!(articles.len(), 3);
        assert!(articles
            .iter()
            .filter(|a| a.body.starts_with("hydrated"))
            .all(|a| !a.body.is_empty()));
    }

    #[tokio::test]
    async fn test_failing_source_does_not_block_others() {
        let configs =
            MemoryConfigStore::new(vec![config("unreachable-a"), config("b")]);
        let sink = MemoryEventStore::new();

        let stats = sweep(&configs, &sink, &mock_registry()).await;
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.sources, 1);
        assert_eq!(stats.saved, 3);
        assert!(sink
            .articles()
            .await
            .iter()
            .all(|a| a.source == "b"));
    }

    #[tokio::test]
    async fn test_failed_hydrate_drops_only_that_stub() {
        let configs = MemoryConfigStore::new(vec![config("flaky")]);
        let sink = MemoryEventStore::new();

        let stats = sweep(&configs, &sink, &mock_registry()).await;
        assert_eq!(stats.fresh, 3);
        assert_eq!(stats.saved, 2);
        assert_eq!(sink.articles().await.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_strategy_skips_source() {
        let mut bad = config("bad");
        bad.strategy = "unknown-id".to_string();
        let configs = MemoryConfigStore::new(vec![bad, config("b")]);
        let sink = MemoryEventStore::new();

        let stats = sweep(&configs, &sink, &mock_registry()).await;
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.sources, 1);
    }

    #[tokio::test]
    async fn test_disabled_source_is_skipped() {
        let mut off = config("off");
        off.enabled = false;
        let configs = MemoryConfigStore::new(vec![off]);
        let sink = MemoryEventStore::new();

        let stats = sweep(&configs, &sink, &mock_registry()).await;
        assert_eq!(stats.sources, 0);
        assert_eq!(stats.skipped, 1);
        assert!(sink.articles().await.is_empty());
    }

    #[tokio::test]
    async fn test_sweep_with_real_strategy_over_http() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<div class="news-item">
                     <a href="/news/first">First story</a>
                     <span class="news__time">12:00</span>
                   </div>
                   <div class="news-item">
                     <a href="/news/second">Second story</a>
                     <span class="news__time">13:45</span>
                   </div>"#,
            ))
            .mount(&server)
            .await;
        for detail in ["first", "second"] {
            Mock::given(method("GET"))
                .and(path(format!("/news/{detail}")))
                .respond_with(ResponseTemplate::new(200).set_body_string(
                    r#"<div class="separator-line"><span>28.08.2026</span></div>
                       <div class="news-detail__content">Story text.</div>"#,
                ))
                .mount(&server)
                .await;
        }

        let config = SourceConfig {
            name: "itworld".to_string(),
            root_url: server.uri(),
            listing_path: "/news/".to_string(),
            strategy: "itworld".to_string(),
            enabled: true,
        };
        let configs = MemoryConfigStore::new(vec![config]);
        let sink = MemoryEventStore::new();
        let registry = StrategyRegistry::with_defaults();

        let stats = sweep(&configs, &sink, &registry).await;
        assert_eq!(stats.saved, 2);
        assert!(sink.articles().await.iter().all(|a| a.body == "Story text."));

        // Same listing again: everything is known now.
        let again = sweep(&configs, &sink, &registry).await;
        assert_eq!(again.fresh, 0);
    }

    #[tokio::test]
    async fn test_second_sweep_finds_nothing_new() {
        let configs = MemoryConfigStore::new(vec![config("a")]);
        let sink = MemoryEventStore::new();
        let registry = mock_registry();

        let first = sweep(&configs, &sink, &registry).await;
        assert_eq!(first.saved, 3);
        let second = sweep(&configs, &sink, &registry).await;
        assert_eq!(second.listed, 3);
        assert_eq!(second.fresh, 0);
        assert_eq!(second.saved, 0);
        assert_eq!(sink.articles().await.len(), 3);
    }
}
