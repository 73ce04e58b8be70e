//! FinSmart — Contextual Intelligence for Modern Markets
//!
//! Entry point. Loads configuration, initialises structured logging,
//! wires the configured news source and insight provider, and serves
//! the dashboard until shut down.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use finsmart::config::AppConfig;
use finsmart::dashboard;
use finsmart::dashboard::routes::DashboardState;
use finsmart::insight::InsightService;
use finsmart::sources::catalog::CatalogSource;
use finsmart::sources::market::MarketSource;
use finsmart::sources::NewsSource;
use finsmart::types::AudienceLevel;

const BANNER: &str = r#"
  =========================================
    FinSmart  —  Market News, In Context
    v0.1.0
  =========================================
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    // Load configuration from TOML
    let cfg = AppConfig::load("config.toml")?;

    // Initialise structured logging
    init_logging();

    println!("{BANNER}");
    info!(
        mode = %cfg.feed.mode,
        port = cfg.dashboard.port,
        "FinSmart starting up"
    );

    // -- News source -----------------------------------------------------

    let source: Box<dyn NewsSource> = match cfg.feed.mode.as_str() {
        "market" => {
            info!(tickers = ?cfg.feed.tickers, "Using live market feed");
            Box::new(MarketSource::new()?)
        }
        "catalog" => {
            info!("Using fixed catalog feed");
            Box::new(CatalogSource::new())
        }
        other => {
            warn!(mode = other, "Unknown feed mode, defaulting to catalog");
            Box::new(CatalogSource::new())
        }
    };

    // -- Insight provider ------------------------------------------------

    // A missing key disables the feature rather than failing startup;
    // the availability check happens once here, never via a failed call.
    let credential = AppConfig::resolve_env(&cfg.insight.api_key_env).ok();
    if credential.is_none() {
        warn!(
            env = %cfg.insight.api_key_env,
            "No insight API key configured — AI analysis disabled"
        );
    }
    let insight = InsightService::from_credential(
        credential,
        Some(cfg.insight.model.clone()),
        Some(cfg.insight.max_tokens),
        Some(cfg.insight.temperature),
    )?;
    if let Some(model) = insight.model_name() {
        info!(model, "Insight generation enabled");
    }

    // -- Dashboard -------------------------------------------------------

    let default_audience: AudienceLevel = cfg
        .feed
        .default_audience
        .parse()
        .unwrap_or(AudienceLevel::Beginner);

    let state = Arc::new(DashboardState {
        source,
        insight,
        topics: cfg.topic_keys().to_vec(),
        default_watchlist: cfg.feed.default_watchlist.clone(),
        default_audience,
    });

    dashboard::serve(state, cfg.dashboard.port).await
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("finsmart=info"));

    let json_logging = std::env::var("FINSMART_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
