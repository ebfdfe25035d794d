use std::collections::HashSet;

use async_trait::async_trait;

use crate::types::{Article, SourceConfig};
use crate::Result;

/// Read-only view of the source configurations. The crawler sweeps whatever
/// this returns, in the order it is returned.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<SourceConfig>>;
}

/// Destination for crawled articles, plus the known-set the dedup filter
/// runs against. Implementations are expected to be internally consistent;
/// the crawler does not coordinate concurrent access for them.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Dedup keys of every article already persisted for this source.
    async fn known_keys(&self, source: &SourceConfig) -> Result<HashSet<String>>;

    /// Persist a batch of freshly hydrated articles. Best effort: the batch
    /// is not required to be transactional, but re-saving a known key must
    /// not corrupt anything.
    async fn save(&self, articles: Vec<Article>, source: &SourceConfig) -> Result<()>;
}
