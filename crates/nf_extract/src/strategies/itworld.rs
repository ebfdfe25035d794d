//! Extraction for the IT World family of sites.
//!
//! Listing markup: one `.news-item` block per story with the headline
//! anchor and a `.news__time` fragment ("14:30"). Detail pages put the
//! publication date in `.separator-line span`, the lede in `.article__lid`
//! and the body in `.news-detail__content`. The site publishes in UTC+6.

use async_trait::async_trait;
use nf_core::{Article, ArticleStub, Error, Result, SourceConfig};
use scraper::Html;

use crate::datetime;
use crate::strategies::utils::{extract_text, extract_texts, resolve_url, sel};
use crate::strategies::{http_client, Strategy};

const TZ_OFFSET_HOURS: i32 = 6;

pub struct ItWorldStrategy {
    client: reqwest::Client,
}

impl ItWorldStrategy {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: http_client()?,
        })
    }
}

#[async_trait]
impl Strategy for ItWorldStrategy {
    fn name(&self) -> &'static str {
        "itworld"
    }

    async fn list_stubs(&self, config: &SourceConfig) -> Result<Vec<ArticleStub>> {
        let url = config.listing_url()?;
        let html = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_listing(&html, &config.root_url)
    }

    async fn hydrate(&self, stub: &ArticleStub, config: &SourceConfig) -> Result<Article> {
        let html = self
            .client
            .get(&stub.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_detail(&html, stub, &config.name)
    }
}

fn parse_listing(html: &str, root_url: &str) -> Result<Vec<ArticleStub>> {
    let document = Html::parse_document(html);
    let item_sel = sel(".news-item")?;
    let anchor_sel = sel("a")?;
    let time_sel = sel(".news__time")?;

    let mut stubs = Vec::new();
    for item in document.select(&item_sel) {
        let Some(anchor) = item.select(&anchor_sel).next() else {
            continue;
        };
        let title = anchor.text().collect::<String>().trim().to_string();
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if title.is_empty() {
            continue;
        }
        let listed_time = item
            .select(&time_sel)
            .next()
            .and_then(|el| datetime::parse_listing_time(&el.text().collect::<String>()));
        stubs.push(ArticleStub {
            title,
            url: resolve_url(root_url, href)?,
            listed_time,
        });
    }
    Ok(stubs)
}

fn parse_detail(html: &str, stub: &ArticleStub, source: &str) -> Result<Article> {
    let document = Html::parse_document(html);

    let date_text = extract_text(&document, ".separator-line span")
        .map_err(|_| Error::Parse(format!("no publication date on {}", stub.url)))?;
    let date = datetime::parse_date(&date_text)?;
    let time = stub
        .listed_time
        .ok_or_else(|| Error::Parse(format!("no listing time for {}", stub.url)))?;
    let published_at = datetime::merge(date, time, TZ_OFFSET_HOURS)?;

    let lede = extract_texts(&document, ".article__lid")?.join(" ");
    let content = extract_texts(&document, ".news-detail__content")?.join("\n");
    let body = if lede.is_empty() {
        content
    } else {
        format!("{lede} {content}")
    };
    if body.is_empty() {
        return Err(Error::Parse(format!("empty article body on {}", stub.url)));
    }

    Ok(Article {
        source: source.to_string(),
        title: stub.title.clone(),
        url: stub.url.clone(),
        published_at,
        body,
        summary: (!lede.is_empty()).then_some(lede),
    })
}
