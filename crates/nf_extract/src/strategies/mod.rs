use std::time::Duration;

use async_trait::async_trait;
use nf_core::{Article, ArticleStub, Error, Result, SourceConfig};
use scraper::{Html, Selector};
use url::Url;

pub mod itworld;
pub mod profit;

pub use itworld::ItWorldStrategy;
pub use profit::ProfitStrategy;

/// Site-specific extraction logic, selected per source by the identifier
/// carried in its [`SourceConfig`]. Listing and detail extraction are
/// separate so the dedup filter can run between them.
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Identifier this strategy registers under.
    fn name(&self) -> &'static str;

    /// Fetches the source's listing page once and returns the candidate
    /// stubs found on it. Zero matching elements is an empty list, not an
    /// error; a failed fetch is [`Error::Fetch`].
    async fn list_stubs(&self, config: &SourceConfig) -> Result<Vec<ArticleStub>>;

    /// Fetches one stub's detail page and fills in the full article.
    /// A page that lacks either timestamp component fails with
    /// [`Error::Parse`] for that stub only.
    async fn hydrate(&self, stub: &ArticleStub, config: &SourceConfig) -> Result<Article>;
}

impl std::fmt::Debug for dyn Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name()).finish()
    }
}

const USER_AGENT: &str = concat!("newsfeeder/", env!("CARGO_PKG_VERSION"));

pub(crate) fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()?)
}

/// Common selector helpers shared by the strategies.
pub(crate) mod utils {
    use super::*;

    pub fn sel(selector: &str) -> Result<Selector> {
        Selector::parse(selector)
            .map_err(|e| Error::Parse(format!("invalid selector {selector}: {e}")))
    }

    pub fn extract_text(document: &Html, selector: &str) -> Result<String> {
        let selector = sel(selector)?;
        document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .ok_or_else(|| Error::Parse(format!("no element for selector: {selector:?}")))
    }

    pub fn extract_texts(document: &Html, selector: &str) -> Result<Vec<String>> {
        let selector = sel(selector)?;
        Ok(document
            .select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
            .collect())
    }

    /// Resolves a listing href against the source root. Listing pages mix
    /// absolute and site-relative links.
    pub fn resolve_url(root: &str, href: &str) -> Result<String> {
        Ok(Url::parse(root)?.join(href)?.to_string())
    }
}
