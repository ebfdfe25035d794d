use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::Result;

/// Description of one crawlable site. Owned and edited outside the core;
/// the crawler only ever reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub root_url: String,
    /// Path of the listing page, joined onto `root_url`.
    pub listing_path: String,
    /// Identifier resolved against the strategy registry.
    pub strategy: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl SourceConfig {
    pub fn listing_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.root_url)?.join(&self.listing_path)?)
    }
}

/// Candidate article found on a listing page, prior to the full-content
/// fetch. Listing pages typically carry only a time-of-day fragment; the
/// date comes from the detail page during hydration.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleStub {
    pub title: String,
    pub url: String,
    pub listed_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub source: String,
    pub title: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub body: String,
    pub summary: Option<String>,
}

impl Article {
    /// Stable identity used by the dedup filter. Must match
    /// [`crate::dedup::key_for`] on the stub this article came from.
    pub fn dedup_key(&self) -> String {
        if self.url.is_empty() {
            self.title.clone()
        } else {
            self.url.clone()
        }
    }
}
