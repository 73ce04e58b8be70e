//! Live market news source.
//!
//! For each requested ticker, fetches the two most recent daily closes
//! (for the percent-change badge) and the single latest news story.
//! Tickers with no story are silently omitted; a ticker never yields
//! more than one item per fetch.
//!
//! API: Yahoo-style chart and search endpoints, no authentication.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::NewsSource;
use crate::types::{NewsItem, Sentiment, Timestamp};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SEARCH_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";

/// Sentinel reported when the price fetch fails outright.
const PRICE_UNAVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Provider response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartResponse {
    #[serde(default)]
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize, Default)]
struct ChartEnvelope {
    #[serde(default)]
    result: Vec<ChartResult>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Deserialize, Default)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize, Default)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<Story>,
}

#[derive(Debug, Deserialize)]
struct Story {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    publisher: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default, rename = "providerPublishTime")]
    provider_publish_time: Option<i64>,
}

// ---------------------------------------------------------------------------
// Percent change
// ---------------------------------------------------------------------------

/// Percent change over the last two closes, as a display string plus
/// price direction.
///
/// Fewer than two data points reports "0.00%"/up: a missing-data day is
/// indistinguishable from a flat one. Preserved as-is for compatibility
/// with the system this replaces.
fn percent_change(closes: &[f64]) -> (String, Sentiment) {
    if closes.len() < 2 {
        return ("0.00%".to_string(), Sentiment::Up);
    }
    let prev = closes[closes.len() - 2];
    let last = closes[closes.len() - 1];
    if prev == 0.0 {
        return ("0.00%".to_string(), Sentiment::Up);
    }
    let pct = (last - prev) / prev * 100.0;
    let direction = if pct < 0.0 { Sentiment::Down } else { Sentiment::Up };
    (format!("{pct:+.2}%"), direction)
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

pub struct MarketSource {
    http: Client,
}

impl MarketSource {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent("FinSmart/0.1.0")
            .build()
            .context("Failed to build market HTTP client")?;
        Ok(Self { http })
    }

    /// Closing prices for the last trading sessions, oldest first.
    async fn fetch_closes(&self, symbol: &str) -> Result<Vec<f64>> {
        let url = format!(
            "{CHART_URL}/{}?range=5d&interval=1d",
            urlencoding::encode(symbol)
        );
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("Chart request failed")?
            .error_for_status()
            .context("Chart request returned error status")?;
        let body: ChartResponse = resp.json().await.context("Failed to parse chart response")?;

        let closes: Vec<f64> = body
            .chart
            .result
            .first()
            .and_then(|r| r.indicators.quote.first())
            .map(|q| q.close.iter().flatten().copied().collect())
            .unwrap_or_default();

        Ok(closes)
    }

    /// Percent-change display string and direction for a ticker.
    ///
    /// Infallible by design: any fetch failure degrades to the "N/A"
    /// sentinel with direction up, never an error for the whole batch.
    async fn price_change(&self, symbol: &str) -> (String, Sentiment) {
        match self.fetch_closes(symbol).await {
            Ok(closes) => percent_change(&closes),
            Err(e) => {
                warn!(symbol, error = %e, "Price fetch failed, reporting N/A");
                (PRICE_UNAVAILABLE.to_string(), Sentiment::Up)
            }
        }
    }

    /// The single most recent story for a ticker, if any.
    async fn latest_story(&self, symbol: &str) -> Result<Option<Story>> {
        let url = format!(
            "{SEARCH_URL}?q={}&newsCount=1&quotesCount=0",
            urlencoding::encode(symbol)
        );
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("Search request failed")?
            .error_for_status()
            .context("Search request returned error status")?;
        let body: SearchResponse = resp.json().await.context("Failed to parse search response")?;
        Ok(body.news.into_iter().next())
    }

    /// Build the feed item for one ticker, or None when the ticker has
    /// no current story (no placeholder card is produced).
    async fn fetch_ticker(&self, symbol: &str) -> Option<NewsItem> {
        let story = match self.latest_story(symbol).await {
            Ok(Some(story)) => story,
            Ok(None) => {
                debug!(symbol, "No story for ticker, omitting");
                return None;
            }
            Err(e) => {
                warn!(symbol, error = %e, "Story fetch failed, omitting ticker");
                return None;
            }
        };

        let (pct, direction) = self.price_change(symbol).await;

        let timestamp = story
            .provider_publish_time
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .map(Timestamp::Absolute)
            .unwrap_or_else(|| Timestamp::Absolute(Utc::now()));

        Some(NewsItem {
            id: uuid::Uuid::new_v4().to_string(),
            headline: story.title.unwrap_or_else(|| "(untitled story)".to_string()),
            source: story.publisher.unwrap_or_else(|| "unknown".to_string()),
            timestamp,
            topics: vec![symbol.to_string()],
            sentiment: direction,
            impact_score: None,
            price_change_percent: Some(pct),
            explanations: None,
            expert_commentary: None,
            link: story.link,
        })
    }
}

#[async_trait]
impl NewsSource for MarketSource {
    async fn fetch(&self, topics: &[String]) -> Result<Vec<NewsItem>> {
        let fetches = topics.iter().map(|symbol| self.fetch_ticker(symbol));
        let items: Vec<NewsItem> = join_all(fetches).await.into_iter().flatten().collect();
        debug!(requested = topics.len(), returned = items.len(), "Market fetch complete");
        Ok(items)
    }

    fn name(&self) -> &str {
        "market"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
