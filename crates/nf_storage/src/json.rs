//! File-backed stores for unattended runs.
//!
//! Configs live in a JSON array that can be edited while the service runs;
//! the file is re-read on every sweep so edits take effect on the next
//! cycle. Articles are appended to a JSON-lines file, which doubles as the
//! known-set replayed for dedup on later runs.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use nf_core::{Article, ConfigStore, EventSink, Result, SourceConfig};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ConfigStore for JsonConfigStore {
    async fn list_all(&self) -> Result<Vec<SourceConfig>> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

pub struct JsonlEventStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlEventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn replay(&self) -> Result<Vec<Article>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut articles = Vec::new();
        for line in raw.lines().filter(|line| !line.trim().is_empty()) {
            match serde_json::from_str::<Article>(line) {
                Ok(article) => articles.push(article),
                // A torn write from a crashed run should not poison the
                // whole store.
                Err(e) => tracing::warn!(error = %e, "skipping unreadable article line"),
            }
        }
        Ok(articles)
    }
}

#[async_trait]
impl EventSink for JsonlEventStore {
    async fn known_keys(&self, source: &SourceConfig) -> Result<HashSet<String>> {
        Ok(self
            .replay()
            .await?
            .iter()
            .filter(|a| a.source == source.name)
            .map(Article::dedup_key)
            .collect())
    }

    async fn save(&self, articles: Vec<Article>, _source: &SourceConfig) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        for article in &articles {
            let mut line = serde_json::to_string(article)?;
            line.push('\n');
            file.write_all(line.as_bytes()).await?;
        }
        file.flush().await?;
        Ok(())
    }
}
