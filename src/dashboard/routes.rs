//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`.
//! Each request runs one synchronous render pass: fetch → filter →
//! build. Failures degrade to sentinels inside the pipeline; only a
//! total fetch failure surfaces as an HTTP error.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::feed;
use crate::insight::{Insight, InsightService};
use crate::sources::NewsSource;
use crate::types::{AudienceLevel, FinSmartError, RenderedCard, UserPreferences};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub source: Box<dyn NewsSource>,
    pub insight: InsightService,
    /// Topic keys offered in the sidebar multi-select.
    pub topics: Vec<String>,
    /// Watchlist used when the request names none.
    pub default_watchlist: Vec<String>,
    pub default_audience: AudienceLevel,
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct FeedParams {
    #[serde(default)]
    pub audience: Option<String>,
    /// Comma-separated topic keys. Absent means the configured default;
    /// present-but-empty means an empty watchlist (empty feed + warning,
    /// never "show all").
    #[serde(default)]
    pub watchlist: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub audience: String,
    pub cards: Vec<RenderedCard>,
    /// Empty-state message. Its presence is not an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<String>,
    pub default_watchlist: Vec<String>,
    pub audiences: Vec<String>,
    pub default_audience: String,
    pub insight_available: bool,
}

#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    pub headline: String,
    /// Ticker or topic the headline is about.
    pub subject: String,
    #[serde(default)]
    pub audience: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InsightResponse {
    Ok { insight: String },
    Unavailable { message: String },
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_audience(
    raw: &Option<String>,
    default: AudienceLevel,
) -> Result<AudienceLevel, (StatusCode, String)> {
    match raw {
        None => Ok(default),
        Some(s) => s
            .parse()
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("{e}"))),
    }
}

/// Split the comma-separated watchlist parameter, preserving order.
fn parse_watchlist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/feed
pub async fn get_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<FeedResponse>, (StatusCode, String)> {
    let audience = parse_audience(&params.audience, state.default_audience)?;
    // Ordered selection: live sources fetch these tickers in this order.
    let selected: Vec<String> = match &params.watchlist {
        None => state.default_watchlist.clone(),
        Some(raw) => parse_watchlist(raw),
    };
    let prefs = UserPreferences::new(audience, selected.clone());

    let items = state
        .source
        .fetch(&selected)
        .await
        .map_err(|e| {
            let err = FinSmartError::Source {
                source_name: state.source.name().to_string(),
                message: e.to_string(),
            };
            (StatusCode::BAD_GATEWAY, err.to_string())
        })?;

    let cards = feed::render_pass(&items, &prefs);
    info!(
        source = state.source.name(),
        fetched = items.len(),
        shown = cards.len(),
        %audience,
        "Feed rendered"
    );

    let warning = if prefs.watchlist.is_empty() {
        Some("No topics selected. Add topics to your watchlist to see news.".to_string())
    } else if cards.is_empty() {
        Some("No news found for your watchlist. Try adding more topics!".to_string())
    } else {
        None
    };

    Ok(Json(FeedResponse {
        audience: audience.to_string(),
        cards,
        warning,
    }))
}

/// GET /api/topics
pub async fn get_topics(State(state): State<AppState>) -> Json<TopicsResponse> {
    Json(TopicsResponse {
        topics: state.topics.clone(),
        default_watchlist: state.default_watchlist.clone(),
        audiences: AudienceLevel::ALL.iter().map(|l| l.to_string()).collect(),
        default_audience: state.default_audience.to_string(),
        insight_available: state.insight.is_available(),
    })
}

/// POST /api/insight
pub async fn post_insight(
    State(state): State<AppState>,
    Json(req): Json<InsightRequest>,
) -> Result<Json<InsightResponse>, (StatusCode, String)> {
    let audience = parse_audience(&req.audience, state.default_audience)?;

    match state
        .insight
        .analyze(&req.headline, &req.subject, audience)
        .await
    {
        Insight::Text(text) => Ok(Json(InsightResponse::Ok { insight: text })),
        Insight::Unavailable => Ok(Json(InsightResponse::Unavailable {
            message: "Insight generation is disabled: no API key configured.".to_string(),
        })),
    }
}

/// GET /api/insight/availability
pub async fn get_insight_availability(State(state): State<AppState>) -> Json<AvailabilityResponse> {
    Json(AvailabilityResponse {
        available: state.insight.is_available(),
        model: state.insight.model_name().map(String::from),
    })
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
