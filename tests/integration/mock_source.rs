//! Mock news source for integration testing.
//!
//! Provides a deterministic `NewsSource` implementation that returns
//! known items and can be forced into failure — all in-memory with no
//! external dependencies.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use finsmart::sources::NewsSource;
use finsmart::types::*;

/// A mock news source for deterministic testing.
///
/// All state is in-memory. Items and failure behaviour are fully
/// controllable from test code.
pub struct MockSource {
    items: Vec<NewsItem>,
    fetch_count: Arc<Mutex<u64>>,
    /// If set, fetches return this error.
    force_error: Arc<Mutex<Option<String>>>,
}

impl MockSource {
    /// Create a mock with custom items.
    pub fn with_items(items: Vec<NewsItem>) -> Self {
        Self {
            items,
            fetch_count: Arc::new(Mutex::new(0)),
            force_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a mock with the default four single-topic items.
    pub fn new() -> Self {
        Self::with_items(Self::default_items())
    }

    /// Force all subsequent fetches to return an error.
    pub fn set_error(&self, msg: &str) {
        *self.force_error.lock().unwrap() = Some(msg.to_string());
    }

    /// Number of fetches performed so far.
    pub fn fetch_count(&self) -> u64 {
        *self.fetch_count.lock().unwrap()
    }

    /// Four items with one topic each, spanning the main categories,
    /// for deterministic filter scenarios.
    pub fn default_items() -> Vec<NewsItem> {
        let topics = ["Macro", "Crypto", "Tech", "Commodities"];
        topics
            .iter()
            .enumerate()
            .map(|(i, topic)| NewsItem {
                id: (i + 1).to_string(),
                headline: format!("{topic} headline {}", i + 1),
                source: "Test Wire".to_string(),
                timestamp: Timestamp::Relative(format!("{}h ago", i + 1)),
                topics: vec![topic.to_string()],
                sentiment: if i % 2 == 0 {
                    Sentiment::Bearish
                } else {
                    Sentiment::Bullish
                },
                impact_score: Some(90 - (i as u8) * 10),
                price_change_percent: None,
                explanations: Some(Explanations {
                    beginner: format!("Simple take on {topic}."),
                    expert: format!("Expert take on {topic}."),
                }),
                expert_commentary: None,
                link: None,
            })
            .collect()
    }
}

#[async_trait]
impl NewsSource for MockSource {
    async fn fetch(&self, _topics: &[String]) -> Result<Vec<NewsItem>> {
        *self.fetch_count.lock().unwrap() += 1;
        if let Some(msg) = self.force_error.lock().unwrap().as_ref() {
            return Err(anyhow!("{msg}"));
        }
        Ok(self.items.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
