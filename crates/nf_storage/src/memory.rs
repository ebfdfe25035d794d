//! In-memory stores, used by tests and as the CLI default sink.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use nf_core::{Article, ConfigStore, EventSink, Result, SourceConfig};
use tokio::sync::RwLock;

/// Fixed list of source configs.
pub struct MemoryConfigStore {
    configs: Vec<SourceConfig>,
}

impl MemoryConfigStore {
    pub fn new(configs: Vec<SourceConfig>) -> Self {
        Self { configs }
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn list_all(&self) -> Result<Vec<SourceConfig>> {
        Ok(self.configs.clone())
    }
}

/// Append-only article store behind an `RwLock`. Duplicate-safe: a key that
/// is already present is silently skipped on save.
pub struct MemoryEventStore {
    articles: Arc<RwLock<Vec<Article>>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self {
            articles: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn articles(&self) -> Vec<Article> {
        self.articles.read().await.clone()
    }
}

impl Default for MemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for MemoryEventStore {
    async fn known_keys(&self, source: &SourceConfig) -> Result<HashSet<String>> {
        Ok(self
            .articles
            .read()
            .await
            .iter()
            .filter(|a| a.source == source.name)
            .map(Article::dedup_key)
            .collect())
    }

    async fn save(&self, articles: Vec<Article>, _source: &SourceConfig) -> Result<()> {
        let mut store = self.articles.write().await;
        for article in articles {
            if store.iter().any(|a| a.dedup_key() == article.dedup_key()) {
                continue;
            }
            store.push(article);
        }
        Ok(())
    }
}
