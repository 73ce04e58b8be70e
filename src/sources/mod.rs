//! News sources.
//!
//! Defines the `NewsSource` trait and provides implementations for:
//! - Catalog — fixed in-memory items, deterministic, no I/O
//! - Market — live per-ticker latest story + 2-session price change

pub mod catalog;
pub mod market;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::NewsItem;

/// Abstraction over raw news record suppliers.
///
/// Implementors return a fresh batch on every call; nothing is cached
/// across fetches. The `topics` argument is the set of topic keys the
/// viewer could select — live sources query it as tickers, the catalog
/// ignores it (filtering is the feed filter's job, not the source's).
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch the current batch of raw news records.
    async fn fetch(&self, topics: &[String]) -> Result<Vec<NewsItem>>;

    /// Source name for logging and identification.
    fn name(&self) -> &str;
}
