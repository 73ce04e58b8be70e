//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Secrets (API keys) are referenced by env-var name in the config and
//! resolved at runtime via `std::env::var`. A missing insight key is
//! not an error — it disables insight generation.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

use crate::types::FinSmartError;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub dashboard: DashboardConfig,
    pub feed: FeedConfig,
    pub insight: InsightConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// "catalog" (fixed in-memory items) or "market" (live per-ticker feed).
    pub mode: String,
    /// Topic keys offered in the sidebar multi-select (catalog mode).
    pub topics: Vec<String>,
    /// Tickers offered in the sidebar multi-select (market mode).
    pub tickers: Vec<String>,
    /// Watchlist pre-selected on first page load.
    pub default_watchlist: Vec<String>,
    /// Audience tier pre-selected on first page load.
    pub default_audience: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InsightConfig {
    pub model: String,
    pub api_key_env: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| FinSmartError::Config(format!("{path}: {e}")))?;
        Ok(config)
    }

    /// Resolve an environment variable name to its value.
    /// Useful for loading secrets referenced in the config.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }

    /// Topic keys for the configured feed mode.
    pub fn topic_keys(&self) -> &[String] {
        if self.feed.mode == "market" {
            &self.feed.tickers
        } else {
            &self.feed.topics
        }
    }
}
