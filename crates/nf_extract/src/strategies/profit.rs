//! Extraction for Profit-style tech outlets.
//!
//! These sites mark stories up as `article.post-item` blocks and expose the
//! publication date on the detail page as a `<time datetime="...">`
//! attribute, either a full RFC 3339 instant or a bare date that still needs
//! the listing-page time. Publishing convention is UTC+5.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use nf_core::{Article, ArticleStub, Error, Result, SourceConfig};
use scraper::Html;

use crate::datetime;
use crate::strategies::utils::{extract_texts, resolve_url, sel};
use crate::strategies::{http_client, Strategy};

const TZ_OFFSET_HOURS: i32 = 5;

pub struct ProfitStrategy {
    client: reqwest::Client,
}

impl ProfitStrategy {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: http_client()?,
        })
    }
}

#[async_trait]
impl Strategy for ProfitStrategy {
    fn name(&self) -> &'static str {
        "profit"
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
    let item_sel = sel("article.post-item")?;
    let link_sel = sel("a.post-item__link")?;
    let time_sel = sel(".post-item__time")?;

    let mut stubs = Vec::new();
    for item in document.select(&item_sel) {
        let Some(link) = item.select(&link_sel).next() else {
            continue;
        };
        let title = link.text().collect::<String>().trim().to_string();
        let Some(href) = link.value().attr("href") else {
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

    let datetime_attr = document
        .select(&sel("time[datetime]")?)
        .next()
        .and_then(|el| el.value().attr("datetime").map(str::to_string))
        .ok_or_else(|| Error::Parse(format!("no publication date on {}", stub.url)))?;
    let published_at = published_at(&datetime_attr, stub)?;

    let lede = extract_texts(&document, ".post-lead")?.join(" ");
    let body = extract_texts(&document, ".post-body p")?.join("\n");
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

fn published_at(attr: &str, stub: &ArticleStub) -> Result<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(attr) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(attr, "%Y-%m-%d")
        .map_err(|_| Error::Parse(format!("unrecognised datetime attribute: {attr}")))?;
    let time = stub
        .listed_time
        .ok_or_else(|| Error::Parse(format!("no listing time for {}", stub.url)))?;
    datetime::merge(date, time, TZ_OFFSET_HOURS)
}
