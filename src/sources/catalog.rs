//! Fixed in-memory news catalog.
//!
//! Deterministic, no I/O, no failure mode. Used to exercise the filter
//! and builder independent of any live dependency, and as the default
//! feed when no market data is wanted.

use anyhow::Result;
use async_trait::async_trait;

use super::NewsSource;
use crate::types::{Commentary, Explanations, NewsItem, Sentiment, Timestamp};

pub struct CatalogSource;

impl CatalogSource {
    pub fn new() -> Self {
        Self
    }

    fn items() -> Vec<NewsItem> {
        vec![
            NewsItem {
                id: "1".to_string(),
                headline: "Fed hikes rates by 25bps, signals pause".to_string(),
                source: "Bloomberg Markets".to_string(),
                timestamp: Timestamp::Relative("10m ago".to_string()),
                topics: vec!["Macro".to_string(), "USD".to_string(), "Fed".to_string()],
                sentiment: Sentiment::Bearish,
                impact_score: Some(95),
                price_change_percent: None,
                explanations: Some(Explanations {
                    beginner: "The US Central Bank is making it more expensive to borrow \
                               money. This usually slows down the economy but helps stop \
                               prices from rising too fast (inflation)."
                        .to_string(),
                    expert: "FOMC delivers 25bps hike as priced in. Dot plot suggests \
                             terminal rate is near. Expect DXY consolidation and pressure \
                             on growth stocks."
                        .to_string(),
                }),
                expert_commentary: Some(Commentary {
                    author: "Mohamed El-Erian".to_string(),
                    quote: "This is the 'trilemma' in action—fighting inflation without \
                            breaking growth."
                        .to_string(),
                }),
                link: None,
            },
            NewsItem {
                id: "2".to_string(),
                headline: "Bitcoin surges past $45k on ETF rumours".to_string(),
                source: "CoinDesk".to_string(),
                timestamp: Timestamp::Relative("2h ago".to_string()),
                topics: vec!["Crypto".to_string(), "BTC".to_string(), "Regulation".to_string()],
                sentiment: Sentiment::Bullish,
                impact_score: Some(88),
                price_change_percent: None,
                explanations: Some(Explanations {
                    beginner: "Bitcoin's price is going up because people think the \
                               government will soon let regular stock investors buy Bitcoin \
                               easily (through an ETF)."
                        .to_string(),
                    expert: "Institutional inflows anticipated pending SEC approval. BTC \
                             breaking key resistance levels; short squeeze likely above $46k."
                        .to_string(),
                }),
                expert_commentary: Some(Commentary {
                    author: "Mohamed El-Erian".to_string(),
                    quote: "Speculative assets are reacting to liquidity hopes, not \
                            fundamentals."
                        .to_string(),
                }),
                link: None,
            },
            NewsItem {
                id: "3".to_string(),
                headline: "NVIDIA revenue beats expectations by 20%".to_string(),
                source: "Financial Times".to_string(),
                timestamp: Timestamp::Relative("4h ago".to_string()),
                topics: vec!["Tech".to_string(), "AI".to_string(), "Stocks".to_string()],
                sentiment: Sentiment::Bullish,
                impact_score: Some(60),
                price_change_percent: None,
                explanations: Some(Explanations {
                    beginner: "NVIDIA (the chip company) sold way more AI chips than anyone \
                               guessed. This is good for the company and shows the AI boom \
                               is real."
                        .to_string(),
                    expert: "Data center revenue up 140% YoY. Forward guidance raised. \
                             Supports the structural AI bull case despite high valuations."
                        .to_string(),
                }),
                // Not all stories have expert comments.
                expert_commentary: None,
                link: None,
            },
            NewsItem {
                id: "4".to_string(),
                headline: "Oil prices drop as production increases".to_string(),
                source: "Reuters".to_string(),
                timestamp: Timestamp::Relative("5h ago".to_string()),
                topics: vec!["Commodities".to_string(), "Oil".to_string(), "Energy".to_string()],
                sentiment: Sentiment::Bearish,
                impact_score: Some(45),
                price_change_percent: None,
                explanations: Some(Explanations {
                    beginner: "Gas might get cheaper soon because there is more oil \
                               available in the market than people need right now."
                        .to_string(),
                    expert: "WTI crude testing support at $70. Supply glut concerns \
                             outweigh geopolitical risk premiums."
                        .to_string(),
                }),
                expert_commentary: None,
                link: None,
            },
        ]
    }
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsSource for CatalogSource {
    async fn fetch(&self, _topics: &[String]) -> Result<Vec<NewsItem>> {
        Ok(Self::items())
    }

    fn name(&self) -> &str {
        "catalog"
    }
}
