//! Shared types for the FinSmart dashboard.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that source, feed, insight,
//! and dashboard modules can depend on them without circular references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Audience
// ---------------------------------------------------------------------------

/// Explanation complexity tier selected by the viewer.
///
/// Intermediate is synthetic: it concatenates the beginner and expert
/// texts rather than drawing on a third data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudienceLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl AudienceLevel {
    /// All tiers in ascending order of complexity (useful for iteration).
    pub const ALL: &'static [AudienceLevel] = &[
        AudienceLevel::Beginner,
        AudienceLevel::Intermediate,
        AudienceLevel::Expert,
    ];

    /// Heading shown above the selected explanation text.
    pub fn label(&self) -> &'static str {
        match self {
            AudienceLevel::Beginner => "The Basic Concept",
            AudienceLevel::Intermediate => "Deep Dive",
            AudienceLevel::Expert => "Technical Analysis",
        }
    }
}

impl fmt::Display for AudienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudienceLevel::Beginner => write!(f, "Beginner"),
            AudienceLevel::Intermediate => write!(f, "Intermediate"),
            AudienceLevel::Expert => write!(f, "Expert"),
        }
    }
}

impl std::str::FromStr for AudienceLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(AudienceLevel::Beginner),
            "intermediate" => Ok(AudienceLevel::Intermediate),
            "expert" => Ok(AudienceLevel::Expert),
            _ => Err(anyhow::anyhow!("Unknown audience level: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// Binary sentiment/direction classification, in the source's vocabulary.
///
/// The mock catalog speaks bullish/bearish; the live price feed speaks
/// up/down. Both map onto the same positive/negative display direction.
/// Serialized lowercase so the value doubles as the card's CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Up,
    Down,
}

impl Sentiment {
    /// Collapse the two vocabularies into the display direction.
    pub fn direction(&self) -> Direction {
        match self {
            Sentiment::Bullish | Sentiment::Up => Direction::Positive,
            Sentiment::Bearish | Sentiment::Down => Direction::Negative,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Bullish => write!(f, "bullish"),
            Sentiment::Bearish => write!(f, "bearish"),
            Sentiment::Up => write!(f, "up"),
            Sentiment::Down => write!(f, "down"),
        }
    }
}

impl std::str::FromStr for Sentiment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bullish" => Ok(Sentiment::Bullish),
            "bearish" => Ok(Sentiment::Bearish),
            "up" => Ok(Sentiment::Up),
            "down" => Ok(Sentiment::Down),
            _ => Err(anyhow::anyhow!("Unknown sentiment: {s}")),
        }
    }
}

/// Display polarity of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Positive => write!(f, "positive"),
            Direction::Negative => write!(f, "negative"),
        }
    }
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Publication time of a story.
///
/// The mock catalog carries relative labels ("10m ago"); the live feed
/// carries absolute instants. Both render through `Display`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Absolute(DateTime<Utc>),
    Relative(String),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Relative(label) => write!(f, "{label}"),
            Timestamp::Absolute(at) => write!(f, "{}", at.format("%b %d, %H:%M UTC")),
        }
    }
}

// ---------------------------------------------------------------------------
// News items
// ---------------------------------------------------------------------------

/// Per-audience explanation texts precomputed by a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanations {
    pub beginner: String,
    pub expert: String,
}

/// A short quoted remark attributed to a named commentator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commentary {
    pub author: String,
    pub quote: String,
}

/// A raw news record as supplied by a source.
///
/// Invariant: `topics` is non-empty (tags for the catalog, a single ticker
/// for the live feed) and `sentiment` carries exactly one classification.
/// Items are rebuilt fresh on every fetch and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    /// Stable identifier, unique within a fetch batch.
    pub id: String,
    pub headline: String,
    /// Publisher name, display text.
    pub source: String,
    pub timestamp: Timestamp,
    /// Topic keys used for watchlist filtering, in display order.
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
    /// Editorial impact score 0–100 (catalog items only).
    pub impact_score: Option<u8>,
    /// Signed percent-change display string (live items only).
    /// `"N/A"` is a sentinel that must propagate verbatim.
    pub price_change_percent: Option<String>,
    /// Absent for live items, which generate insight on demand.
    pub explanations: Option<Explanations>,
    pub expert_commentary: Option<Commentary>,
    /// Link to the full story (live items only).
    pub link: Option<String>,
}

impl fmt::Display for NewsItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({} | {})",
            self.source,
            self.headline,
            self.sentiment,
            self.topics.join(", "),
        )
    }
}

impl NewsItem {
    /// Whether any of this item's topic keys appears in the watchlist.
    pub fn matches_watchlist(&self, watchlist: &HashSet<String>) -> bool {
        self.topics.iter().any(|t| watchlist.contains(t))
    }

    /// Helper to build a test item with sensible defaults.
    #[cfg(test)]
    pub fn sample() -> Self {
        NewsItem {
            id: "test-001".to_string(),
            headline: "Fed hikes rates by 25bps, signals pause".to_string(),
            source: "Bloomberg Markets".to_string(),
            timestamp: Timestamp::Relative("10m ago".to_string()),
            topics: vec!["Macro".to_string(), "USD".to_string()],
            sentiment: Sentiment::Bearish,
            impact_score: Some(95),
            price_change_percent: None,
            explanations: Some(Explanations {
                beginner: "Borrowing gets more expensive.".to_string(),
                expert: "FOMC delivers 25bps as priced in.".to_string(),
            }),
            expert_commentary: None,
            link: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Session-scoped viewer preferences, passed explicitly into the
/// filter and builder. Never persisted, never read from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    pub audience: AudienceLevel,
    /// Selected topic keys. Empty is valid and yields an empty feed
    /// with a warning, not an unfiltered feed.
    pub watchlist: HashSet<String>,
}

impl UserPreferences {
    pub fn new(audience: AudienceLevel, watchlist: impl IntoIterator<Item = String>) -> Self {
        Self {
            audience,
            watchlist: watchlist.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Rendered cards
// ---------------------------------------------------------------------------

/// Display-ready card derived from a `NewsItem` and the current
/// preferences. Rebuilt on every render pass; no identity beyond the
/// source item's id; never mutated after construction.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedCard {
    pub id: String,
    pub headline: String,
    pub source: String,
    /// Pre-formatted timestamp, relative or absolute.
    pub timestamp: String,
    /// Source-vocabulary class: bullish | bearish | up | down.
    pub sentiment: Sentiment,
    pub direction: Direction,
    /// Topic badges in source order.
    pub badges: Vec<String>,
    pub explanation_label: String,
    /// Absent when the source carries no precomputed explanation;
    /// the UI then shows a generate-insight call-to-action instead.
    pub explanation_text: Option<String>,
    pub needs_insight: bool,
    /// Either "`score`/100" or a signed percent string ("N/A" passes
    /// through verbatim).
    pub metric_display: String,
    pub commentary: Option<Commentary>,
    pub link: Option<String>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for FinSmart.
#[derive(Debug, thiserror::Error)]
pub enum FinSmartError {
    #[error("News source error ({source_name}): {message}")]
    Source { source_name: String, message: String },

    #[error("Insight unavailable ({model}): {message}")]
    Insight { model: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
